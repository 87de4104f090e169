use super::HeightField;

/// Constant surface height. Used for debugging physics on predictable ground.
pub struct FlatHeightField {
    height: i32,
}

impl FlatHeightField {
    pub fn new(height: i32) -> FlatHeightField {
        Self { height }
    }
}

impl HeightField for FlatHeightField {
    fn height(&self, _x: i32, _z: i32) -> i32 {
        self.height
    }
}
