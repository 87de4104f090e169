use glam::IVec3;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(i32),
    #[error("chunk at {position} has size {actual}, world expects {expected}")]
    ChunkSizeMismatch {
        position: IVec3,
        expected: usize,
        actual: usize,
    },
    #[error("chunk anchor {0} is not aligned to the chunk grid")]
    MisalignedAnchor(IVec3),
    #[error("a chunk is already loaded at chunk coordinate {0}")]
    DuplicateChunk(IVec3),
}
