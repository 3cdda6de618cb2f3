//! Sensitivity operations over the value model's mark substrate.
//!
//! All four operations are total: every value shape (known scalars,
//! collections, structural values, null, unknown, dynamic placeholders) is
//! accepted, and any mark other than the sensitivity token passes through
//! every operation verbatim. The `Result` return keeps the error channel
//! uniform with the rest of the evaluator's function surface; none of these
//! operations ever constructs a [`FuncError`] themselves.

use thiserror::Error;

use sable_value_core::{Mark, Value};

/// Errors reported by evaluator-facing functions. Reserved here: the
/// sensitivity operations are total, so any failure a caller observes
/// originates in a collaborator and is propagated unchanged.
#[derive(Debug, Error)]
pub enum FuncError {
    #[error("value operation failed: {0}")]
    Value(String),
}

/// Returns `value` with the sensitivity mark added to its outer node.
///
/// The effective payload is untouched, nullness and unknown-ness are
/// unaffected, and marking an already-sensitive value changes nothing. Any
/// other mark the value carries is preserved as-is; an unexpected mark from
/// an upstream producer is tolerated, never treated as an error and never
/// collapsed into the sensitivity token.
pub fn make_sensitive(value: &Value) -> Result<Value, FuncError> {
    Ok(value.mark(Mark::Sensitive))
}

/// Returns `value` with the sensitivity mark removed from its outer node.
///
/// Not an error when the mark is absent: callers use this defensively to
/// guarantee a definitely-not-sensitive postcondition. Unknown values may
/// still resolve to something sensitive later; removing the mark only
/// reflects what is known now. All other marks stay untouched.
pub fn make_nonsensitive(value: &Value) -> Result<Value, FuncError> {
    Ok(value.unmark_token(&Mark::Sensitive))
}

/// True if the value's own mark set carries the sensitivity mark. Shallow:
/// marks on nested elements are not consulted.
pub fn is_sensitive(value: &Value) -> Result<bool, FuncError> {
    Ok(value.has_mark(&Mark::Sensitive))
}

/// Flips the sensitivity mark: present becomes absent, absent becomes
/// present. Pure composition of the other three operations, so their
/// idempotence and preservation guarantees carry over unchanged.
pub fn toggle_sensitive(value: &Value) -> Result<Value, FuncError> {
    if is_sensitive(value)? {
        make_nonsensitive(value)
    } else {
        make_sensitive(value)
    }
}
