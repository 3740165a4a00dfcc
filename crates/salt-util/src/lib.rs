//! salt-util - shared foundations for the Salt interpreter.
//!
//! Holds the language tables (the registry every other stage reads from)
//! and the error/diagnostic types threaded through the whole pipeline.

pub mod error;
pub mod tables;

pub use error::{SaltDiagnostic, SaltError, SaltResult};
