pub mod orbit_path;
pub mod renderer;
pub mod visual_world;

pub use orbit_path::OrbitPath;
pub use renderer::{LogRenderer, Renderer};
pub use visual_world::{BodyInstance, TourStatus, VisualWorld};
