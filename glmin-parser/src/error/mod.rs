//! Errors raised while classifying leaves, building token trees and simplifying them.
//!
//! None of these are recoverable: each one points at a defect in the leaf classification or in
//! the tree code itself, and aborts the current build or simplification.

pub mod kind;

pub use glmin_error::{Error, ErrorKind};

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
