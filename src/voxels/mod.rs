pub mod coords;
pub mod error;
pub mod generators;
pub mod ground;
pub mod voxel;
pub mod world;

pub use crate::voxels::error::WorldError;
pub use crate::voxels::ground::BodyState;
pub use crate::voxels::ground::GroundResolver;
pub use crate::voxels::ground::GroundState;
pub use crate::voxels::voxel::CHUNK_SIZE;
pub use crate::voxels::voxel::VoxelChunk;
pub use crate::voxels::voxel::VoxelKind;
pub use crate::voxels::world::VoxelWorld;
