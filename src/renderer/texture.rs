use glow::{HasContext, NativeTexture};
use std::{error::Error, path::Path, rc::Rc};

pub struct Texture {
    gl: Rc<glow::Context>,
    tbo: NativeTexture,
}

impl Texture {
    /// Loads an image flipped vertically so that v = 0 is the bottom row
    pub fn new(gl: &Rc<glow::Context>, img_path: &Path) -> Result<Texture, Box<dyn Error>> {
        let (image_data, width, height) = load_rgba_image_as_u8_raw(img_path)?;
        Self::from_rgba(gl, &image_data, width, height)
    }

    pub fn from_rgba(
        gl: &Rc<glow::Context>,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Texture, Box<dyn Error>> {
        if data.len() != (width * height * 4) as usize {
            return Err(format!(
                "RGBA buffer of {} bytes does not match {width}x{height}",
                data.len()
            )
            .into());
        }
        let tbo = create_texture_from_rgba_u8(gl, data, width, height)?;
        Ok(Self {
            gl: Rc::clone(gl),
            tbo,
        })
    }

    /// Two-tone checkerboard with one square per atlas tile
    pub fn checker(
        gl: &Rc<glow::Context>,
        size: u32,
        tiles: u32,
    ) -> Result<Texture, Box<dyn Error>> {
        let data = checker_rgba(size, tiles);
        Self::from_rgba(gl, &data, size, size)
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_texture(gl::TEXTURE_2D, Some(self.tbo));
        }
    }
    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_texture(gl::TEXTURE_2D, None);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.tbo);
        }
    }
}

fn create_texture_from_rgba_u8(
    gl: &glow::Context,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<NativeTexture, Box<dyn Error>> {
    unsafe {
        let texture = gl.create_texture()?;
        gl.bind_texture(gl::TEXTURE_2D, Some(texture));

        // Atlas tiles must not bleed into each other
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
        gl.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);

        // Upload texture data
        gl.tex_image_2d(
            gl::TEXTURE_2D,
            0,               // level
            gl::RGBA as i32, // internal format
            width as i32,
            height as i32,
            0,                 // border
            gl::RGBA,          // format
            gl::UNSIGNED_BYTE, // type
            Some(data),        // raw data
        );

        gl.bind_texture(gl::TEXTURE_2D, None);
        Ok(texture)
    }
}

fn load_rgba_image_as_u8_raw<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<u8>, u32, u32), Box<dyn std::error::Error>> {
    let img = image::open(path)?.flipv().to_rgba8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width, height))
}

fn checker_rgba(size: u32, tiles: u32) -> Vec<u8> {
    let tile_px = (size / tiles.max(1)).max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / tile_px) + (y / tile_px)) % 2 == 0;
            let shade = if light { 0xb0 } else { 0x50 };
            data.extend_from_slice(&[shade, shade, shade, 0xff]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::checker_rgba;

    #[test]
    fn checker_alternates_per_tile() {
        let data = checker_rgba(12, 6);
        assert_eq!(data.len(), 12 * 12 * 4);
        let px = |x: usize, y: usize| data[(y * 12 + x) * 4];
        // Tiles are 2px wide
        assert_eq!(px(0, 0), px(1, 1));
        assert_ne!(px(0, 0), px(2, 0));
        assert_ne!(px(0, 0), px(0, 2));
        assert_eq!(px(0, 0), px(2, 2));
        assert!(data.chunks(4).all(|p| p[3] == 0xff));
    }
}
