use std::sync::Arc;

use glam::IVec3;

use crate::{
    config::TerrainConfig,
    voxels::{VoxelChunk, VoxelKind},
};

pub mod flat;
pub mod heightmap;
pub mod sine;

pub use flat::FlatHeightField;
pub use heightmap::PerlinHeightField;
pub use sine::SineHeightField;

/// Terrain surface height for a world column.
///
/// Must only depend on `(x, z)` so that chunks generated independently agree
/// on their shared borders.
pub trait HeightField: Sync + Send {
    fn height(&self, x: i32, z: i32) -> i32;
}

pub fn height_field_from_config(config: &TerrainConfig) -> Arc<dyn HeightField> {
    match *config {
        TerrainConfig::Sine {
            base,
            amplitude,
            frequency,
        } => Arc::new(SineHeightField::new(base, amplitude, frequency)),
        TerrainConfig::Perlin { seed, max_height } => {
            Arc::new(PerlinHeightField::new(seed, max_height))
        }
        TerrainConfig::Flat { height } => Arc::new(FlatHeightField::new(height)),
    }
}

/// Fills chunks below the surface of a [`HeightField`]
#[derive(Clone)]
pub struct TerrainGenerator {
    chunk_size: usize,
    height_field: Arc<dyn HeightField>,
}

impl TerrainGenerator {
    pub fn new(chunk_size: usize, height_field: Arc<dyn HeightField>) -> TerrainGenerator {
        Self {
            chunk_size,
            height_field,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Generates the chunk at **chunk** space coordinate `chunk_coord`.
    /// A cell is solid iff its world y is at or below the column height.
    pub fn generate_chunk(&self, chunk_coord: IVec3) -> VoxelChunk {
        let origin = chunk_coord * self.chunk_size as i32;
        let size = self.chunk_size;
        // Column heights are reused for every y in the chunk
        let mut heights = vec![0; size * size];
        for x in 0..size {
            for z in 0..size {
                heights[x * size + z] = self
                    .height_field
                    .height(origin.x + x as i32, origin.z + z as i32);
            }
        }
        VoxelChunk::from_fn(origin, size, |local| {
            let height = heights[local.x as usize * size + local.z as usize];
            if origin.y + local.y <= height {
                VoxelKind::Solid
            } else {
                VoxelKind::Air
            }
        })
    }
}
