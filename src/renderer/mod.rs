pub mod atlas;
pub mod shader;
pub mod texture;
mod voxel_renderer;

pub use voxel_renderer::VoxelWorldRenderer;
pub use voxel_renderer::format_with_commas;
