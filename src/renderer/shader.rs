use std::{collections::HashMap, error::Error, fs, rc::Rc};

use glam::Mat4;
use glow::{HasContext, NativeUniformLocation};
use log::{error, warn};

pub struct Shader {
    gl: Rc<glow::Context>,
    program: <glow::Context as HasContext>::Program,
    uniforms: HashMap<String, Option<NativeUniformLocation>>,
}

impl Shader {
    pub fn new(
        gl: Rc<glow::Context>,
        vert_path: &str,
        frag_path: &str,
    ) -> Result<Shader, Box<dyn Error>> {
        let vert_src = fs::read_to_string(vert_path)
            .map_err(|err| format!("Unable to read vertex shader {vert_path}: {err}"))?;
        let frag_src = fs::read_to_string(frag_path)
            .map_err(|err| format!("Unable to read fragment shader {frag_path}: {err}"))?;
        let shaders = [
            (glow::VERTEX_SHADER, vert_src, vert_path),
            (glow::FRAGMENT_SHADER, frag_src, frag_path),
        ];
        unsafe {
            // Compile shaders & load program
            let program = gl.create_program()?;
            let mut compiled = Vec::with_capacity(shaders.len());
            for (kind, source, path) in &shaders {
                let shader = gl.create_shader(*kind)?;
                gl.shader_source(shader, source);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    gl.delete_program(program);
                    return Err(format!("Failed to compile {path}: {log}").into());
                }
                gl.attach_shader(program, shader);
                compiled.push(shader);
            }
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            for shader in compiled {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(format!("Failed to link {vert_path} + {frag_path}: {log}").into());
            }
            let instance = Self {
                gl,
                program,
                uniforms: HashMap::new(),
            };
            instance.check_gl_errors();
            Ok(instance)
        }
    }

    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
    }

    pub fn check_gl_errors(&self) {
        unsafe {
            let mut error = self.gl.get_error();
            while error != glow::NO_ERROR {
                error!("OpenGL Error: 0x{error:X}");
                error = self.gl.get_error();
            }
        }
    }

    fn get_uniform_location(&mut self, name: &str) -> Option<NativeUniformLocation> {
        if let Some(loc) = self.uniforms.get(name) {
            return *loc;
        }
        unsafe {
            let loc = self.gl.get_uniform_location(self.program, name);
            if loc.is_none() {
                warn!("Trying to set unknown uniform {name}");
            }
            self.uniforms.insert(name.to_string(), loc);
            loc
        }
    }

    pub fn set_uniform_i32(&mut self, name: &str, value: i32) {
        let loc = self.get_uniform_location(name);
        unsafe {
            self.gl.uniform_1_i32(loc.as_ref(), value);
        }
    }

    pub fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) {
        let loc = self.get_uniform_location(name);
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(loc.as_ref(), false, value.to_cols_array().as_ref());
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}
