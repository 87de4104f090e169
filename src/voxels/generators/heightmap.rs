use noise::{NoiseFn, Perlin};

use super::HeightField;

pub struct PerlinHeightField {
    max_height: i32,
    perlin: Perlin,
    scale: f64,
}

impl PerlinHeightField {
    pub fn new(seed: u32, max_height: i32) -> PerlinHeightField {
        Self {
            max_height,
            perlin: Perlin::new(seed),
            // TUNING
            scale: 0.03,
        }
    }
}

impl HeightField for PerlinHeightField {
    fn height(&self, x: i32, z: i32) -> i32 {
        let fx = x as f64 * self.scale;
        let fz = z as f64 * self.scale;
        // [-1; 1]
        let noise_val = self.perlin.get([fx, fz]).clamp(-1.0, 1.0);
        ((noise_val + 1.0) * (self.max_height as f64 / 2.0)).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{HeightField, PerlinHeightField};

    #[test]
    fn same_seed_same_terrain() {
        let a = PerlinHeightField::new(99, 14);
        let b = PerlinHeightField::new(99, 14);
        for x in -40..40 {
            for z in -40..40 {
                let h = a.height(x, z);
                assert_eq!(h, b.height(x, z));
                assert!((0..=14).contains(&h));
            }
        }
    }
}
