//! Swagger 2.0 document model, loading, path normalization and route
//! aggregation.

mod build;
mod load;
mod path;
mod types;

pub use build::*;
pub use load::*;
pub use path::*;
pub use types::*;
