// Counting core: angle math, the rep state machine, overlay composition
// and the frame loop that ties the platform collaborators together

pub mod angle;
pub mod config;
pub mod overlay;
pub mod pipeline;
pub mod rep_counter;
