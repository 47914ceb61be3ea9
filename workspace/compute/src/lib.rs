//! Pure financial computations: loan affordability, record aggregation and
//! project ledgers. Nothing in this crate performs I/O.

pub mod aggregate;
pub mod error;
pub mod loan;
pub mod money;
pub mod projects;

pub use error::{ComputeError, Result};
