//! Shared value fixtures for sable test suites.
//!
//! The named payloads live in `fixtures/values.json` at the workspace root in
//! the tagged serde layout of `sable_value_core::Value`; this crate loads
//! them once and hands out clones. [`behavioral_table`] extends the named
//! payloads with the placeholder shapes and mark configurations the
//! sensitivity tests sweep over.

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use sable_value_core::{Mark, Type, Value};

static VALUES: Lazy<HashMap<String, Value>> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/values.json");
    serde_json::from_str(raw).expect("value fixtures should parse")
});

/// Fetch a named fixture value. Panics on an unknown name so a typo fails
/// the test that made it rather than silently passing.
pub fn value(name: &str) -> Value {
    VALUES
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no fixture value named {name:?}"))
}

/// The non-standard mark used by tests that exercise mark preservation.
pub fn custom_mark() -> Mark {
    Mark::other("custom")
}

/// One value per row of the edge-case policy table: known scalars, every
/// collection/structural shape, null, unknown, the dynamic placeholder, and
/// values carrying zero, one, or multiple marks (including a nested mark on
/// a collection element).
pub fn behavioral_table() -> Vec<Value> {
    let mut table: Vec<Value> = [
        "greeting", "answer", "flag", "pair", "settings", "profile", "mixed",
    ]
    .iter()
    .map(|name| value(name))
    .collect();

    table.push(Value::null(Type::String));
    table.push(Value::unknown(Type::String));
    table.push(Value::dynamic());

    table.push(value("answer").mark(custom_mark()));
    table.push(value("greeting").mark(custom_mark()).mark(Mark::Sensitive));
    table.push(Value::list(vec![Value::number(1.0).mark(Mark::Sensitive)]));

    table
}
