//! multiCAD console library: configuration and the per-instruction session
//! used by the `mc-console` binary.

pub mod config;
pub mod session;

pub use config::ConsoleConfig;
pub use session::Session;
