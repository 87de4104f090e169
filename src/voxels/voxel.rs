use glam::{IVec3, Mat4, Vec3};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelKind {
    Air = 0,
    Solid = 1,
}

impl VoxelKind {
    pub fn is_solid(self) -> bool {
        matches!(self, VoxelKind::Solid)
    }
}

pub const CHUNK_SIZE: usize = 16;

/// Cubic block grid. Contents are fixed at construction, there is no way to
/// place or remove a voxel afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelChunk {
    voxels: Box<[VoxelKind]>, // owned, contiguous memory, (x * S + y) * S + z
    size: usize,
    /// Minimum corner (world pos)
    pub position: IVec3,
}

impl VoxelChunk {
    /// Builds a chunk anchored at **world_pos**, asking `kind_at` for every local cell.
    pub fn from_fn(
        position: IVec3,
        size: usize,
        mut kind_at: impl FnMut(IVec3) -> VoxelKind,
    ) -> VoxelChunk {
        let mut voxels = Vec::with_capacity(size * size * size);
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    voxels.push(kind_at(IVec3::new(x as i32, y as i32, z as i32)));
                }
            }
        }
        Self {
            voxels: voxels.into_boxed_slice(),
            size,
            position,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, local: IVec3) -> Option<usize> {
        let s = self.size as i32;
        if local.cmplt(IVec3::ZERO).any() || local.cmpge(IVec3::splat(s)).any() {
            return None;
        }
        Some(((local.x * s + local.y) * s + local.z) as usize)
    }

    /// Voxel at a local cell. Cells outside `[0, S)` read as air.
    pub fn get(&self, local: IVec3) -> VoxelKind {
        match self.index(local) {
            Some(idx) => self.voxels[idx],
            None => VoxelKind::Air,
        }
    }

    pub fn is_solid(&self, local: IVec3) -> bool {
        self.get(local).is_solid()
    }

    /// Returns flattened list of voxels
    pub fn voxel_slice(&self) -> &[VoxelKind] {
        &self.voxels
    }

    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_solid()).count()
    }

    /// Transform placing the chunk's local origin in the world
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position.as_vec3())
    }

    /// World position (minimum corner) of every solid cell
    pub fn iter_solid(&self) -> impl Iterator<Item = IVec3> + '_ {
        let s = self.size as i32;
        self.voxels
            .iter()
            .enumerate()
            .filter(|(_, kind)| kind.is_solid())
            .map(move |(idx, _)| {
                let idx = idx as i32;
                self.position + IVec3::new(idx / (s * s), (idx / s) % s, idx % s)
            })
    }

    /// Same as [`VoxelChunk::iter_solid`], as float positions ready for a cube instance buffer
    pub fn solid_positions(&self) -> Vec<Vec3> {
        self.iter_solid().map(|p| p.as_vec3()).collect()
    }
}
