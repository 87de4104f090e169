use log::{info, trace};
use rayon::prelude::*;
use std::{collections::HashMap, time::Instant};

use glam::{IVec3, Mat4, Vec3};

use crate::voxels::{
    VoxelChunk, WorldError,
    coords::{chunk_anchor, locate},
    generators::TerrainGenerator,
};

/// Generates all chunks of a square `(2r + 1)²` grid at chunk layer y = 0.
/// Chunks are independent of each other, so they are built on the rayon pool.
fn generate_chunk_grid(radius: i32, generator: &TerrainGenerator) -> Vec<VoxelChunk> {
    // Precalculate positions to be able to distribute them amongst worker threads
    let positions: Vec<IVec3> = (-radius..=radius)
        .flat_map(|x| (-radius..=radius).map(move |z| IVec3::new(x, 0, z)))
        .collect();
    positions
        .into_par_iter()
        .map(|chunk_coord| {
            let chunk = generator.generate_chunk(chunk_coord);
            trace!(
                "Generated chunk {chunk_coord} with {} solid voxels",
                chunk.solid_count()
            );
            chunk
        })
        .collect()
}

pub struct VoxelWorld {
    chunk_size: i32,
    // Insertion order, used for rendering
    chunks: Vec<VoxelChunk>,
    // Chunk coordinate -> index into `chunks`
    lookup: HashMap<IVec3, usize>,
}

impl VoxelWorld {
    pub fn new(chunk_size: i32) -> Result<VoxelWorld, WorldError> {
        if chunk_size <= 0 {
            return Err(WorldError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunk_size,
            chunks: Vec::new(),
            lookup: HashMap::new(),
        })
    }

    /// Builds a world of `(2 * radius + 1)²` chunks around the origin
    pub fn generate(radius: i32, generator: &TerrainGenerator) -> Result<VoxelWorld, WorldError> {
        let mut world = VoxelWorld::new(generator.chunk_size() as i32)?;
        info!("Generating world with chunk radius {radius}");
        let start_world_generation = Instant::now();
        // All chunks are finished before the first one is inserted
        for chunk in generate_chunk_grid(radius, generator) {
            world.insert(chunk)?;
        }
        info!(
            "World generation: Generated {} chunks ({} solid voxels) in {}ms",
            world.chunk_count(),
            world.solid_count(),
            start_world_generation.elapsed().as_secs_f32() * 1000.0,
        );
        Ok(world)
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn solid_count(&self) -> usize {
        self.chunks.iter().map(|c| c.solid_count()).sum()
    }

    pub fn insert(&mut self, chunk: VoxelChunk) -> Result<(), WorldError> {
        if chunk.size() != self.chunk_size as usize {
            return Err(WorldError::ChunkSizeMismatch {
                position: chunk.position,
                expected: self.chunk_size as usize,
                actual: chunk.size(),
            });
        }
        let s = IVec3::splat(self.chunk_size);
        if chunk.position.rem_euclid(s) != IVec3::ZERO {
            return Err(WorldError::MisalignedAnchor(chunk.position));
        }
        let chunk_coord = chunk.position.div_euclid(s);
        if self.lookup.contains_key(&chunk_coord) {
            return Err(WorldError::DuplicateChunk(chunk_coord));
        }
        self.lookup.insert(chunk_coord, self.chunks.len());
        self.chunks.push(chunk);
        Ok(())
    }

    /// See [`locate`]
    pub fn locate(&self, world_pos: Vec3) -> (IVec3, IVec3) {
        locate(world_pos, self.chunk_size)
    }

    pub fn chunk_at(&self, chunk_coord: IVec3) -> Option<&VoxelChunk> {
        self.lookup
            .get(&chunk_coord)
            .map(|&idx| &self.chunks[idx])
    }

    /// Whether the block containing `world_pos` is solid.
    /// Space without a loaded chunk is air.
    pub fn is_solid(&self, world_pos: Vec3) -> bool {
        let (chunk_coord, local) = self.locate(world_pos);
        match self.chunk_at(chunk_coord) {
            Some(chunk) => {
                debug_assert_eq!(chunk.position, chunk_anchor(chunk_coord, self.chunk_size));
                chunk.is_solid(local)
            }
            None => false,
        }
    }

    /// Chunks with the transform that places them in the world, in insertion order
    pub fn iter_render_chunks(&self) -> impl Iterator<Item = (Mat4, &VoxelChunk)> {
        self.chunks.iter().map(|chunk| (chunk.transform(), chunk))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{IVec3, Vec3};

    use crate::voxels::{
        VoxelChunk, VoxelKind, VoxelWorld, WorldError,
        generators::{FlatHeightField, SineHeightField, TerrainGenerator},
    };

    fn flat_world(radius: i32, height: i32) -> VoxelWorld {
        let generator = TerrainGenerator::new(16, Arc::new(FlatHeightField::new(height)));
        VoxelWorld::generate(radius, &generator).unwrap()
    }

    #[test]
    fn generate_3x3_grid() {
        let world = flat_world(1, 8);
        assert_eq!(world.chunk_count(), 9);
        for x in -1..=1 {
            for z in -1..=1 {
                let chunk = world.chunk_at(IVec3::new(x, 0, z)).unwrap();
                assert_eq!(chunk.position, IVec3::new(x * 16, 0, z * 16));
            }
        }
        assert!(world.chunk_at(IVec3::new(2, 0, 0)).is_none());
        assert!(world.chunk_at(IVec3::new(0, 1, 0)).is_none());
    }

    #[test]
    fn solidity_queries_follow_terrain() {
        let world = flat_world(1, 8);
        assert!(world.is_solid(Vec3::new(0.5, 8.5, 0.5)));
        assert!(world.is_solid(Vec3::new(0.0, 0.0, 0.0)));
        assert!(!world.is_solid(Vec3::new(0.5, 9.0, 0.5)));
        // Negative side of the origin resolves to the (-1, 0, -1) chunk
        assert!(world.is_solid(Vec3::new(-0.5, 8.9, -0.5)));
        assert!(world.is_solid(Vec3::new(-16.0, 3.0, -16.0)));
    }

    #[test]
    fn unloaded_space_is_air() {
        let world = flat_world(1, 8);
        // Below the only chunk layer, beyond the grid and far away
        assert!(!world.is_solid(Vec3::new(0.5, -0.5, 0.5)));
        assert!(!world.is_solid(Vec3::new(48.0, 4.0, 0.0)));
        assert!(!world.is_solid(Vec3::new(24.0, 4.0, 40.0)));
        assert!(!world.is_solid(Vec3::new(-17.0, 4.0, 0.0)));
        assert!(!world.is_solid(Vec3::new(1e4, 4.0, -1e4)));
        let empty = VoxelWorld::new(16).unwrap();
        assert!(!empty.is_solid(Vec3::ZERO));
    }

    #[test]
    fn rejects_invalid_chunk_size() {
        assert_eq!(
            VoxelWorld::new(0).err(),
            Some(WorldError::InvalidChunkSize(0))
        );
        assert!(VoxelWorld::new(-4).is_err());
    }

    #[test]
    fn rejects_duplicate_chunks() {
        let mut world = VoxelWorld::new(16).unwrap();
        let anchor = IVec3::new(-16, 0, 32);
        world
            .insert(VoxelChunk::from_fn(anchor, 16, |_| VoxelKind::Air))
            .unwrap();
        let err = world
            .insert(VoxelChunk::from_fn(anchor, 16, |_| VoxelKind::Solid))
            .unwrap_err();
        assert_eq!(err, WorldError::DuplicateChunk(IVec3::new(-1, 0, 2)));
        // First insertion wins
        assert!(!world.is_solid(Vec3::new(-8.0, 1.0, 40.0)));
    }

    #[test]
    fn rejects_misaligned_or_mismatched_chunks() {
        let mut world = VoxelWorld::new(16).unwrap();
        let misaligned = VoxelChunk::from_fn(IVec3::new(8, 0, 0), 16, |_| VoxelKind::Air);
        assert_eq!(
            world.insert(misaligned),
            Err(WorldError::MisalignedAnchor(IVec3::new(8, 0, 0)))
        );
        let small = VoxelChunk::from_fn(IVec3::ZERO, 8, |_| VoxelKind::Air);
        assert!(matches!(
            world.insert(small),
            Err(WorldError::ChunkSizeMismatch { actual: 8, .. })
        ));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn render_chunks_keep_insertion_order() {
        let mut world = VoxelWorld::new(4).unwrap();
        let anchors = [IVec3::new(4, 0, 0), IVec3::new(-4, 0, 0), IVec3::ZERO];
        for anchor in anchors {
            world
                .insert(VoxelChunk::from_fn(anchor, 4, |_| VoxelKind::Solid))
                .unwrap();
        }
        let rendered: Vec<(Vec3, IVec3)> = world
            .iter_render_chunks()
            .map(|(transform, chunk)| (transform.w_axis.truncate(), chunk.position))
            .collect();
        for ((translation, position), anchor) in rendered.iter().zip(anchors) {
            assert_eq!(*position, anchor);
            assert_eq!(*translation, anchor.as_vec3());
        }
    }

    #[test]
    fn terrain_world_matches_height_field() {
        use crate::voxels::generators::HeightField;
        let field = Arc::new(SineHeightField::new(8, 3.0, 0.15));
        let world = VoxelWorld::generate(1, &TerrainGenerator::new(16, field.clone())).unwrap();
        for x in -16..32 {
            for z in [-16, -3, 0, 7, 31] {
                let h = field.height(x, z);
                let column = Vec3::new(x as f32 + 0.5, 0.0, z as f32 + 0.5);
                assert!(world.is_solid(column + Vec3::Y * h as f32));
                assert!(!world.is_solid(column + Vec3::Y * (h + 1) as f32));
            }
        }
    }
}
