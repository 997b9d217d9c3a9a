pub mod billboard;
pub mod label;
pub mod marker;
pub mod surface;

pub use billboard::*;
pub use label::*;
pub use marker::*;
pub use surface::*;
