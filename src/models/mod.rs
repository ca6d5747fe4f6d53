// Data models for frames, pose landmarks, counting state, drawing and sessions

pub mod capture;
pub mod geometry;
pub mod pose;
pub mod render;
pub mod rep;
pub mod session;
