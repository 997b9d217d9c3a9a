//! Earth-frame math shared by the scene and the interaction pipeline.

pub mod math;
