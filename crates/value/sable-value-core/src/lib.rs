//! sable-value-core: dynamically typed value model with shallow marks (core, engine-agnostic)

pub mod json;
pub mod marks;
pub mod ty;
pub mod value;

pub use marks::{Mark, MarkSet};
pub use ty::{Field, Type};
pub use value::{Value, ValueKind};
