//! Infrastructure layer implementing the interfaces defined by the domain layer.
//!
//! - [`persistence`] - URL repository backends (memory and JSON file)

pub mod persistence;
