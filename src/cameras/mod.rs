pub mod camera;
pub mod fpscam;

pub use camera::Camera;
pub use camera::CameraController;
pub use fpscam::FirstPersonCam;
