use super::HeightField;

/// Rolling hills from two sinusoids, one per horizontal axis
pub struct SineHeightField {
    base: i32,
    amplitude: f32,
    frequency: f32,
}

impl SineHeightField {
    pub fn new(base: i32, amplitude: f32, frequency: f32) -> SineHeightField {
        Self {
            base,
            amplitude,
            frequency,
        }
    }
}

impl HeightField for SineHeightField {
    fn height(&self, x: i32, z: i32) -> i32 {
        let wave = (x as f32 * self.frequency).sin() + (z as f32 * self.frequency).sin();
        self.base + (self.amplitude * wave).round() as i32
    }
}
