//! Interaction pipeline for placing urban-heat-island interventions on a globe.
//!
//! A click flows left to right: screen point → [`picker`] → [`tool`] read →
//! [`prediction`] request → [`render`] annotation + [`info`] message. The
//! [`orchestrator`] owns that per-click control flow.

pub mod config;
pub mod geo;
pub mod info;
pub mod intervention;
pub mod orchestrator;
pub mod picker;
pub mod prediction;
pub mod render;
pub mod tool;

pub use config::*;
pub use geo::*;
pub use info::*;
pub use intervention::*;
pub use orchestrator::*;
pub use picker::*;
pub use prediction::*;
pub use render::*;
pub use tool::*;
