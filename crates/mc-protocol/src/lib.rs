pub mod commands;
pub mod geometry;
pub mod params;
pub mod report;

pub use commands::*;
pub use geometry::*;
pub use params::*;
pub use report::*;
