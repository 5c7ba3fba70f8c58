//! CAD executor boundary for multiCAD.
//!
//! Defines the `CadExecutor` trait a drawing backend implements, a
//! `CommandDispatcher` mapping each interpreted operation to exactly one
//! backend call, and `DryRunExecutor`, an in-memory drawing used by the
//! console and the test suites.

pub mod dispatch;
pub mod dry_run;
pub mod error;
pub mod interface;

pub use dispatch::{CommandDispatcher, ExecutionOutcome};
pub use dry_run::{DrawnEntity, DryRunExecutor, LayerInfo};
pub use error::{ExecError, ExecResult};
pub use interface::{CadExecutor, EntityHandle, EntityStyle};
