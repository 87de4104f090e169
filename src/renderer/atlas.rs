//! Unit cube geometry textured from a square tile atlas.

/// Tiles per atlas row and column
pub const ATLAS_TILES: u32 = 6;
pub const TILE_SIZE: f32 = 1.0 / ATLAS_TILES as f32;

/// Floats per vertex: position xyz + uv
pub const VERTEX_STRIDE: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileUv {
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
}

pub fn tile_uv(col: u32, row: u32) -> TileUv {
    debug_assert!(col < ATLAS_TILES && row < ATLAS_TILES);
    let u_min = col as f32 * TILE_SIZE;
    let v_min = row as f32 * TILE_SIZE;
    TileUv {
        u_min,
        v_min,
        u_max: u_min + TILE_SIZE,
        v_max: v_min + TILE_SIZE,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Atlas (column, row)
    pub fn tile(self) -> (u32, u32) {
        match self {
            CubeFace::Front => (1, 1),  // Stone
            CubeFace::Back => (2, 1),   // Cobble
            CubeFace::Left => (3, 1),   // Wood
            CubeFace::Right => (4, 1),  // Brick
            CubeFace::Top => (0, 0),    // Grass top
            CubeFace::Bottom => (0, 1), // Dirt
        }
    }

    /// Corner positions and whether each corner takes u_max / v_max
    fn corners(self) -> [([f32; 3], bool, bool); 4] {
        let (l, h) = (-0.5, 0.5);
        match self {
            CubeFace::Front => [
                ([l, l, h], false, true),
                ([h, l, h], true, true),
                ([h, h, h], true, false),
                ([l, h, h], false, false),
            ],
            CubeFace::Back => [
                ([l, l, l], true, true),
                ([h, l, l], false, true),
                ([h, h, l], false, false),
                ([l, h, l], true, false),
            ],
            CubeFace::Left => [
                ([l, l, l], false, true),
                ([l, l, h], true, true),
                ([l, h, h], true, false),
                ([l, h, l], false, false),
            ],
            CubeFace::Right => [
                ([h, l, l], true, true),
                ([h, l, h], false, true),
                ([h, h, h], false, false),
                ([h, h, l], true, false),
            ],
            CubeFace::Top => [
                ([l, h, l], false, false),
                ([h, h, l], true, false),
                ([h, h, h], true, true),
                ([l, h, h], false, true),
            ],
            CubeFace::Bottom => [
                ([l, l, l], false, true),
                ([h, l, l], true, true),
                ([h, l, h], true, false),
                ([l, l, h], false, false),
            ],
        }
    }
}

/// Interleaved `[x, y, z, u, v]` for 24 vertices, 4 per face, cube centred on the origin
pub fn cube_vertices() -> Vec<f32> {
    let mut vertices = Vec::with_capacity(24 * VERTEX_STRIDE);
    for face in CubeFace::ALL {
        let (col, row) = face.tile();
        let uv = tile_uv(col, row);
        for (pos, max_u, max_v) in face.corners() {
            vertices.extend_from_slice(&pos);
            vertices.push(if max_u { uv.u_max } else { uv.u_min });
            vertices.push(if max_v { uv.v_max } else { uv.v_min });
        }
    }
    vertices
}

/// Two triangles per face
pub fn cube_indices() -> Vec<u32> {
    (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CubeFace, TILE_SIZE, VERTEX_STRIDE, cube_indices, cube_vertices, tile_uv};

    #[test]
    fn tile_uv_spans_one_tile() {
        let uv = tile_uv(4, 1);
        assert!((uv.u_min - 4.0 / 6.0).abs() < 1e-6);
        assert!((uv.v_min - 1.0 / 6.0).abs() < 1e-6);
        assert!((uv.u_max - uv.u_min - TILE_SIZE).abs() < 1e-6);
        assert!((uv.v_max - uv.v_min - TILE_SIZE).abs() < 1e-6);
        assert_eq!(tile_uv(0, 0).u_min, 0.0);
    }

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 24 * VERTEX_STRIDE);
        let indices = cube_indices();
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| i < 24));
        assert_eq!(&indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&indices[30..], &[20, 21, 22, 22, 23, 20]);
    }

    #[test]
    fn face_uvs_stay_inside_their_tile() {
        let vertices = cube_vertices();
        for (face_idx, face) in CubeFace::ALL.iter().enumerate() {
            let (col, row) = face.tile();
            let uv = tile_uv(col, row);
            for corner in 0..4 {
                let v = &vertices[(face_idx * 4 + corner) * VERTEX_STRIDE..][..VERTEX_STRIDE];
                assert!(v[..3].iter().all(|c| c.abs() == 0.5));
                assert!(v[3] == uv.u_min || v[3] == uv.u_max);
                assert!(v[4] == uv.v_min || v[4] == uv.v_max);
            }
        }
    }

    #[test]
    fn top_face_is_flat_at_half() {
        let vertices = cube_vertices();
        let top = CubeFace::ALL
            .iter()
            .position(|f| *f == CubeFace::Top)
            .unwrap();
        for corner in 0..4 {
            assert_eq!(vertices[(top * 4 + corner) * VERTEX_STRIDE + 1], 0.5);
        }
    }
}
