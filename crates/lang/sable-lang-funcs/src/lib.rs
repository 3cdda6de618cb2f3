//! sable-lang-funcs: value-manipulation functions exposed to the language evaluator.

pub mod sensitive;

pub use sensitive::{
    is_sensitive, make_nonsensitive, make_sensitive, toggle_sensitive, FuncError,
};
