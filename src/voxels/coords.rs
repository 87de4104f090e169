use glam::{IVec3, Vec3};

/// Block containing a world space point. Floors, so `-0.5` lands in block `-1`.
pub fn block_coord(world_pos: Vec3) -> IVec3 {
    world_pos.floor().as_ivec3()
}

/// Resolves a world space point into `(chunk coordinate, local cell)`.
///
/// Uses floor division on the block coordinate, so the local cell is always
/// within `[0, chunk_size)` on every axis, including for negative positions.
pub fn locate(world_pos: Vec3, chunk_size: i32) -> (IVec3, IVec3) {
    debug_assert!(chunk_size > 0);
    let block = block_coord(world_pos);
    let chunk = block.div_euclid(IVec3::splat(chunk_size));
    let local = block - chunk * chunk_size;
    (chunk, local)
}

/// World position of local cell `(0, 0, 0)` of the chunk at `chunk_coord`
pub fn chunk_anchor(chunk_coord: IVec3, chunk_size: i32) -> IVec3 {
    chunk_coord * chunk_size
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};

    use super::{chunk_anchor, locate};

    const S: i32 = 16;

    #[test]
    fn negative_block_maps_to_negative_chunk() {
        let (chunk, local) = locate(Vec3::new(-1.0, 0.0, -1.0), S);
        assert_eq!(chunk, IVec3::new(-1, 0, -1));
        assert_eq!(local, IVec3::new(15, 0, 15));
    }

    #[test]
    fn fractional_negative_positions_floor() {
        let (chunk, local) = locate(Vec3::new(-0.25, -16.5, -15.99), S);
        assert_eq!(chunk, IVec3::new(-1, -2, -1));
        assert_eq!(local, IVec3::new(15, 15, 0));
    }

    #[test]
    fn chunk_boundaries() {
        assert_eq!(locate(Vec3::new(15.999, 0.0, 0.0), S).0, IVec3::ZERO);
        assert_eq!(locate(Vec3::new(16.0, 0.0, 0.0), S).0, IVec3::X);
        assert_eq!(locate(Vec3::new(-16.0, 0.0, 0.0), S), (-IVec3::X, IVec3::ZERO));
        assert_eq!(locate(Vec3::new(-16.001, 0.0, 0.0), S).0, IVec3::new(-2, 0, 0));
    }

    #[test]
    fn local_cell_always_in_range() {
        for i in -70..70 {
            let v = i as f32 * 0.73;
            let (_, local) = locate(Vec3::new(v, -v, v * 2.1), S);
            assert!(local.cmpge(IVec3::ZERO).all(), "{local} below range for {v}");
            assert!(local.cmplt(IVec3::splat(S)).all(), "{local} above range for {v}");
        }
    }

    #[test]
    fn locate_round_trips_chunk_and_local() {
        for cx in -2..=2 {
            for cy in -1..=1 {
                for cz in [-3, 0, 5] {
                    let chunk = IVec3::new(cx, cy, cz);
                    for local in [IVec3::ZERO, IVec3::new(15, 0, 7), IVec3::splat(15)] {
                        let world = (chunk_anchor(chunk, S) + local).as_vec3();
                        assert_eq!(locate(world, S), (chunk, local));
                        // Anywhere inside the block resolves to the same cell
                        assert_eq!(locate(world + Vec3::splat(0.5), S), (chunk, local));
                    }
                }
            }
        }
    }
}
