pub mod camera;
pub mod enemy;
pub mod player;
pub mod resolver;
