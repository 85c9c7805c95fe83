pub mod camera;
pub mod logger;
