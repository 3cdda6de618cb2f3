//! Value: immutable nodes of the dynamically typed value model.
//!
//! Every node pairs a payload with a shallow [`MarkSet`]. Marking never
//! alters the payload, and a mark placed on a collection does not appear on
//! the elements extracted from it (nor the other way around). Values are
//! immutable; every operation that changes marks returns a fresh node.

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::marks::{Mark, MarkSet};
use crate::ty::{Field, Type};

/// Lightweight kind enum for pattern-matching and quick dispatch. Null and
/// unknown payloads report their own kind regardless of their declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    String,
    List,
    Map,
    Object,
    Tuple,
    Null,
    Unknown,
}

/// The effective payload of a node. `Null` and `Unknown` carry the declared
/// type so a placeholder still knows what it will eventually hold;
/// `Unknown(Type::Dynamic)` is the fully dynamic placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub(crate) enum Repr {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Object(HashMap<String, Value>),
    Tuple(Vec<Value>),
    Null(Type),
    Unknown(Type),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub(crate) repr: Repr,
    marks: MarkSet,
}

impl Value {
    fn from_repr(repr: Repr) -> Value {
        Value {
            repr,
            marks: MarkSet::new(),
        }
    }

    // --- Constructors ----------------------------------------------------

    pub fn bool(v: bool) -> Value {
        Value::from_repr(Repr::Bool(v))
    }

    pub fn number(v: f64) -> Value {
        Value::from_repr(Repr::Number(v))
    }

    pub fn string(v: impl Into<String>) -> Value {
        Value::from_repr(Repr::String(v.into()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::from_repr(Repr::List(items))
    }

    pub fn map(entries: HashMap<String, Value>) -> Value {
        Value::from_repr(Repr::Map(entries))
    }

    pub fn object(entries: HashMap<String, Value>) -> Value {
        Value::from_repr(Repr::Object(entries))
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::from_repr(Repr::Tuple(items))
    }

    /// A null value of the given type. Nullness survives marking untouched.
    pub fn null(ty: Type) -> Value {
        Value::from_repr(Repr::Null(ty))
    }

    /// An unknown value of the given type: its data is not yet determined
    /// but its type may be. Unknown-ness survives marking untouched.
    pub fn unknown(ty: Type) -> Value {
        Value::from_repr(Repr::Unknown(ty))
    }

    /// The fully dynamic placeholder: unknown value, unresolved type.
    pub fn dynamic() -> Value {
        Value::unknown(Type::Dynamic)
    }

    // --- Accessors -------------------------------------------------------

    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match &self.repr {
            Repr::Bool(_) => ValueKind::Bool,
            Repr::Number(_) => ValueKind::Number,
            Repr::String(_) => ValueKind::String,
            Repr::List(_) => ValueKind::List,
            Repr::Map(_) => ValueKind::Map,
            Repr::Object(_) => ValueKind::Object,
            Repr::Tuple(_) => ValueKind::Tuple,
            Repr::Null(_) => ValueKind::Null,
            Repr::Unknown(_) => ValueKind::Unknown,
        }
    }

    /// Structural type of this value. Collection element types are inferred
    /// from the first element; empty collections report `Dynamic` elements.
    pub fn type_of(&self) -> Type {
        match &self.repr {
            Repr::Bool(_) => Type::Bool,
            Repr::Number(_) => Type::Number,
            Repr::String(_) => Type::String,
            Repr::List(items) => Type::List(Box::new(
                items.first().map(Value::type_of).unwrap_or(Type::Dynamic),
            )),
            Repr::Map(entries) => Type::Map(Box::new(
                entries
                    .values()
                    .next()
                    .map(Value::type_of)
                    .unwrap_or(Type::Dynamic),
            )),
            Repr::Object(entries) => {
                let mut fields: Vec<Field> = entries
                    .iter()
                    .map(|(name, value)| Field {
                        name: name.clone(),
                        ty: value.type_of(),
                    })
                    .collect();
                fields.sort_by(|a, b| a.name.cmp(&b.name));
                Type::Object(fields)
            }
            Repr::Tuple(items) => Type::Tuple(items.iter().map(Value::type_of).collect()),
            Repr::Null(ty) | Repr::Unknown(ty) => ty.clone(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self.repr, Repr::Unknown(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.repr {
            Repr::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            Repr::String(v) => Some(v),
            _ => None,
        }
    }

    /// Element of a List or Tuple by position.
    pub fn index(&self, idx: usize) -> Option<&Value> {
        match &self.repr {
            Repr::List(items) | Repr::Tuple(items) => items.get(idx),
            _ => None,
        }
    }

    /// Entry of a Map or Object by key/field name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        match &self.repr {
            Repr::Map(entries) | Repr::Object(entries) => entries.get(name),
            _ => None,
        }
    }

    // --- Mark substrate (shallow) ----------------------------------------

    /// Returns a new value with `mark` added to this node's mark set. The
    /// payload is untouched and any mark already present stays present;
    /// adding a mark twice is a no-op.
    #[must_use]
    pub fn mark(&self, mark: Mark) -> Value {
        let mut marks = self.marks.clone();
        marks.insert(mark);
        Value {
            repr: self.repr.clone(),
            marks,
        }
    }

    /// Returns a new value with `mark` removed from this node's mark set.
    /// Removing a mark that is not present is a no-op; all other marks stay.
    #[must_use]
    pub fn unmark_token(&self, mark: &Mark) -> Value {
        let mut marks = self.marks.clone();
        marks.remove(mark);
        Value {
            repr: self.repr.clone(),
            marks,
        }
    }

    /// True if this node's own mark set contains `mark`. Shallow: marks on
    /// nested values are not consulted.
    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn is_marked(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Splits this value into its effective value (no marks on the outer
    /// node) and the mark set it carried.
    pub fn unmark(&self) -> (Value, MarkSet) {
        (Value::from_repr(self.repr.clone()), self.marks.clone())
    }

    /// Returns a new value carrying the union of this node's marks and
    /// `marks`. Inverse of [`Value::unmark`] up to set union.
    #[must_use]
    pub fn with_marks(&self, marks: MarkSet) -> Value {
        let mut merged = self.marks.clone();
        merged.merge(marks);
        Value {
            repr: self.repr.clone(),
            marks: merged,
        }
    }

    /// Deep query: true if this node or any nested value carries `mark`.
    /// The shallow substrate primitives never use this; it exists for
    /// callers that need to know whether a mark hides anywhere inside.
    pub fn contains_mark(&self, mark: &Mark) -> bool {
        if self.marks.contains(mark) {
            return true;
        }
        match &self.repr {
            Repr::List(items) | Repr::Tuple(items) => {
                items.iter().any(|item| item.contains_mark(mark))
            }
            Repr::Map(entries) | Repr::Object(entries) => {
                entries.values().any(|value| value.contains_mark(mark))
            }
            _ => false,
        }
    }
}

// Marks are runtime-only state: serialization emits the payload alone, and
// deserialized values start with an empty mark set.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::from_repr(Repr::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom() -> Mark {
        Mark::other("custom")
    }

    #[test]
    fn mark_preserves_payload() {
        let v = Value::string("hello").mark(Mark::Sensitive);
        assert_eq!(v.as_str(), Some("hello"));
        let (raw, marks) = v.unmark();
        assert_eq!(raw, Value::string("hello"));
        assert!(marks.contains(&Mark::Sensitive));
    }

    #[test]
    fn mark_is_idempotent() {
        let once = Value::number(1.0).mark(Mark::Sensitive);
        let twice = once.mark(Mark::Sensitive);
        assert_eq!(once, twice);
        assert_eq!(twice.marks().len(), 1);
    }

    #[test]
    fn unmark_token_keeps_unrelated_marks() {
        let v = Value::number(1.0).mark(custom()).mark(Mark::Sensitive);
        let stripped = v.unmark_token(&Mark::Sensitive);
        assert!(!stripped.has_mark(&Mark::Sensitive));
        assert!(stripped.has_mark(&custom()));
        assert_eq!(stripped.as_number(), Some(1.0));
    }

    #[test]
    fn marking_does_not_force_null_or_unknown() {
        let null = Value::null(Type::String).mark(Mark::Sensitive);
        assert!(null.is_null());
        assert!(null.has_mark(&Mark::Sensitive));

        let unknown = Value::unknown(Type::String).mark(Mark::Sensitive);
        assert!(!unknown.is_known());
        assert_eq!(unknown.type_of(), Type::String);

        let dynamic = Value::dynamic().mark(Mark::Sensitive);
        assert!(!dynamic.is_known());
        assert!(dynamic.type_of().is_dynamic());
    }

    #[test]
    fn collection_marks_are_independent_of_element_marks() {
        let inner = Value::number(1.0).mark(Mark::Sensitive);
        let list = Value::list(vec![inner, Value::number(2.0)]);
        assert!(!list.is_marked());

        let marked_list = list.mark(custom());
        let extracted = marked_list.index(0).expect("element present");
        assert!(extracted.has_mark(&Mark::Sensitive));
        assert!(!extracted.has_mark(&custom()));
    }

    #[test]
    fn with_marks_unions_with_existing_marks() {
        let v = Value::bool(true).mark(custom());
        let remarked = v.with_marks(MarkSet::from(Mark::Sensitive));
        assert!(remarked.has_mark(&custom()));
        assert!(remarked.has_mark(&Mark::Sensitive));
    }

    #[test]
    fn unmark_then_with_marks_round_trips() {
        let v = Value::string("x").mark(custom()).mark(Mark::Sensitive);
        let (raw, marks) = v.unmark();
        assert!(!raw.is_marked());
        assert_eq!(raw.with_marks(marks), v);
    }

    #[test]
    fn contains_mark_sees_nested_marks() {
        let inner = Value::string("secret").mark(Mark::Sensitive);
        let mut entries = HashMap::new();
        entries.insert("password".to_string(), inner);
        let obj = Value::object(entries);

        assert!(!obj.has_mark(&Mark::Sensitive));
        assert!(obj.contains_mark(&Mark::Sensitive));
        assert!(!obj.contains_mark(&custom()));
    }

    #[test]
    fn serialization_drops_marks() {
        let v = Value::string("hello").mark(Mark::Sensitive);
        let json = serde_json::to_value(&v).expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "string", "data": "hello" }));

        let back: Value = serde_json::from_value(json).expect("deserialize");
        assert!(!back.is_marked());
        assert_eq!(back.as_str(), Some("hello"));
    }

    #[test]
    fn type_of_reports_declared_type_for_placeholders() {
        assert_eq!(Value::null(Type::Number).type_of(), Type::Number);
        assert_eq!(
            Value::unknown(Type::List(Box::new(Type::Bool))).type_of(),
            Type::List(Box::new(Type::Bool)),
        );
    }
}
