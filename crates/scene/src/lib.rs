pub mod camera;
pub mod components;
pub mod entity;
pub mod globe;
pub mod host;
pub mod picking;
pub mod world;

pub use camera::*;
pub use host::*;
pub use world::*;
