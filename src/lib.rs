pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod hud;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod types;

pub use camera::{CameraMode, CameraState, OrbitCamera};
pub use config::{CameraConfig, ViewerConfig, WindowConfig};
pub use projection::{Projection, ProjectionMode};
pub use scene::Scene;
