//! End-to-end tests for multiCAD live in `tests/`; this crate has no code.
