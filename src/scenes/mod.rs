pub mod game;
pub mod scene;

pub use game::GameScene;
pub use scene::Scene;
