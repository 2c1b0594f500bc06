//! Utility functions and types

pub mod linalg;

pub use linalg::{symmetric_eigen, top_eigenpairs, JacobiSettings, VecOps, EPSILON};
