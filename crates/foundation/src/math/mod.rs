pub mod frame;
pub mod geodesy;
pub mod vec;

pub use frame::*;
pub use geodesy::*;
pub use vec::*;
