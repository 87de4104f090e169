use std::{error::Error, path::Path, rc::Rc, time::Instant};

use glam::{Mat4, Vec3};
use glow::{HasContext, NativeBuffer};
use log::{debug, trace, warn};

use crate::{
    cameras::Camera,
    renderer::{
        atlas::{ATLAS_TILES, VERTEX_STRIDE, cube_indices, cube_vertices},
        shader::Shader,
        texture::Texture,
    },
    voxels::{VoxelChunk, VoxelWorld},
};

const ATLAS_PATH: &str = "assets/textures/atlas.png";
const FALLBACK_ATLAS_SIZE: u32 = 96;

pub struct VoxelWorldRenderer {
    // Common rendering resources shared across chunk meshes
    gl: Rc<glow::Context>,
    texture: Texture,
    shader: Shader,
    cube_vbo: NativeBuffer,
    cube_ebo: NativeBuffer,
    index_count: i32,

    // Built once, in world insertion order. The world is immutable after generation.
    chunk_meshes: Vec<VoxelChunkMesh>,
}

impl VoxelWorldRenderer {
    pub fn new(
        gl: Rc<glow::Context>,
        world: &VoxelWorld,
    ) -> Result<VoxelWorldRenderer, Box<dyn Error>> {
        // Setup shader
        let mut shader = Shader::new(
            gl.clone(),
            "assets/shaders/voxel.vert",
            "assets/shaders/voxel.frag",
        )?;
        shader.use_program();
        shader.set_uniform_i32("uAtlas", 0);

        let texture = load_atlas(&gl)?;

        let vertices = cube_vertices();
        let indices = cube_indices();
        let vertices_bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let indices_bytes: &[u8] = bytemuck::cast_slice(&indices);
        let (cube_vbo, cube_ebo) = unsafe {
            // Interleaved position + uv
            let vbo = gl.create_buffer()?;
            gl.bind_buffer(gl::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(gl::ARRAY_BUFFER, vertices_bytes, gl::STATIC_DRAW);
            gl.bind_buffer(gl::ARRAY_BUFFER, None);
            let ebo = gl.create_buffer()?;
            gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(gl::ELEMENT_ARRAY_BUFFER, indices_bytes, gl::STATIC_DRAW);
            gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, None);
            (vbo, ebo)
        };

        let start = Instant::now();
        let mut chunk_meshes = Vec::with_capacity(world.chunk_count());
        for (transform, chunk) in world.iter_render_chunks() {
            chunk_meshes.push(VoxelChunkMesh::new(
                gl.clone(),
                cube_vbo,
                cube_ebo,
                transform,
                chunk,
            )?);
        }
        debug!(
            "Buffered {} chunk meshes in {}ms",
            chunk_meshes.len(),
            start.elapsed().as_millis()
        );

        Ok(Self {
            gl,
            texture,
            shader,
            cube_vbo,
            cube_ebo,
            index_count: indices.len() as i32,
            chunk_meshes,
        })
    }

    pub fn get_instance_count(&self) -> i32 {
        self.chunk_meshes.iter().map(|m| m.instance_count).sum()
    }

    pub fn render(&mut self, cam: &Camera) {
        let view = cam.get_view_matrix();
        let projection = cam.get_projection_matrix();

        self.shader.use_program();
        self.shader.set_uniform_mat4("uView", &view);
        self.shader.set_uniform_mat4("uProjection", &projection);
        unsafe {
            self.gl.active_texture(gl::TEXTURE0);
        }
        self.texture.bind();

        for mesh in self.chunk_meshes.iter().filter(|m| m.instance_count > 0) {
            self.shader.set_uniform_mat4("uModel", &mesh.transform);
            unsafe {
                self.gl.bind_vertex_array(Some(mesh.vao));
                self.gl.draw_elements_instanced(
                    glow::TRIANGLES,
                    self.index_count,
                    glow::UNSIGNED_INT,
                    0,
                    mesh.instance_count,
                );
                self.gl.bind_vertex_array(None);
            }
        }
        self.texture.unbind();
    }
}

impl Drop for VoxelWorldRenderer {
    fn drop(&mut self) {
        // Chunk VAOs reference the shared buffers
        self.chunk_meshes.clear();
        unsafe {
            self.gl.delete_buffer(self.cube_vbo);
            self.gl.delete_buffer(self.cube_ebo);
        }
    }
}

fn load_atlas(gl: &Rc<glow::Context>) -> Result<Texture, Box<dyn Error>> {
    match Texture::new(gl, Path::new(ATLAS_PATH)) {
        Ok(texture) => Ok(texture),
        Err(err) => {
            let cwd = std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "<unknown>".to_string());
            warn!("Could not load {ATLAS_PATH} (cwd: {cwd}): {err}. Using checker texture");
            Texture::checker(gl, FALLBACK_ATLAS_SIZE, ATLAS_TILES)
        }
    }
}

/// Cube centres for every solid cell, relative to the chunk anchor
fn instance_positions(chunk: &VoxelChunk) -> Vec<Vec3> {
    let anchor = chunk.position.as_vec3();
    chunk
        .solid_positions()
        .into_iter()
        .map(|block| block - anchor + Vec3::splat(0.5))
        .collect()
}

struct VoxelChunkMesh {
    gl: Rc<glow::Context>,
    vao: <glow::Context as HasContext>::VertexArray,
    transform: Mat4,
    // Voxel position buffer in this chunk
    instance_vbo: NativeBuffer,
    // Number of voxels rendered
    pub instance_count: i32,
}

impl VoxelChunkMesh {
    pub fn new(
        gl: Rc<glow::Context>,
        cube_vbo: NativeBuffer,
        cube_ebo: NativeBuffer,
        transform: Mat4,
        chunk: &VoxelChunk,
    ) -> Result<VoxelChunkMesh, Box<dyn Error>> {
        let positions = instance_positions(chunk);
        let positions_bytes: &[u8] = bytemuck::cast_slice(&positions);
        let stride = (VERTEX_STRIDE * size_of::<f32>()) as i32;

        // Setup buffers and vertex attributes
        unsafe {
            let start_buffering = Instant::now();
            let instance_vbo = gl.create_buffer()?;
            gl.bind_buffer(gl::ARRAY_BUFFER, Some(instance_vbo));
            gl.buffer_data_u8_slice(gl::ARRAY_BUFFER, positions_bytes, gl::STATIC_DRAW);

            // Setup vertex array object
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, Some(cube_ebo));
            // Setup position attribute
            gl.bind_buffer(gl::ARRAY_BUFFER, Some(cube_vbo));
            gl.vertex_attrib_pointer_f32(0, 3, gl::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            // Setup tex_coords attribute
            let uv_offset = 3 * size_of::<f32>() as i32;
            gl.vertex_attrib_pointer_f32(1, 2, gl::FLOAT, false, stride, uv_offset);
            gl.enable_vertex_attrib_array(1);
            // Setup instance offset attribute
            gl.bind_buffer(gl::ARRAY_BUFFER, Some(instance_vbo));
            gl.vertex_attrib_pointer_f32(2, 3, gl::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(2);
            // Update vertex attribute at index 2 on every new instance
            gl.vertex_attrib_divisor(2, 1);

            // Cleanup
            gl.bind_vertex_array(None);
            gl.bind_buffer(gl::ARRAY_BUFFER, None);
            gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, None);

            trace!(
                "Chunk {} GPU buffering of {} instances took {}s",
                chunk.position,
                positions.len(),
                start_buffering.elapsed().as_secs_f32()
            );
            Ok(Self {
                gl,
                transform,
                instance_count: positions.len() as i32,
                instance_vbo,
                vao,
            })
        }
    }
}

impl Drop for VoxelChunkMesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.instance_vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
