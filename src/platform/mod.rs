// External collaborators: frame sources, pose models, drawing, display
// The counting core only sees these traits

pub mod capture;
pub mod display;
pub mod pose;
pub mod render;

pub use capture::Camera;
pub use display::Display;
pub use pose::PoseEstimator;
pub use render::Renderer;
