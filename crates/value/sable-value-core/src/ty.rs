//! Type definitions for the value model.

use serde::{Deserialize, Serialize};

/// A field in an Object type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// The Type expresses the structural type of a value. Collection element
/// types are carried so that null and unknown values can still report a
/// concrete type; `Dynamic` stands in wherever the type is not yet decided.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "id", content = "data", rename_all = "lowercase")]
pub enum Type {
    // Primitives
    Bool,
    Number,
    String,

    // Collections (homogeneous element type)
    List(Box<Type>),
    Map(Box<Type>),

    // Structural
    Object(Vec<Field>),
    Tuple(Vec<Type>),

    /// Placeholder for a type that has not been resolved yet.
    Dynamic,
}

impl Type {
    /// Convenience: create an Object type from a list of (name, type) pairs.
    pub fn object(fields: Vec<(&str, Type)>) -> Type {
        Type::Object(
            fields
                .into_iter()
                .map(|(name, ty)| Field {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
        )
    }

    /// Element type of a List or Map, if this is one.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::List(elem) | Type::Map(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_helper_builds_fields_in_order() {
        let ty = Type::object(vec![("a", Type::Bool), ("b", Type::Number)]);
        match ty {
            Type::Object(fields) => {
                assert_eq!(fields[0].name, "a");
                assert_eq!(fields[1].ty, Type::Number);
            }
            other => panic!("expected object type, got {other:?}"),
        }
    }

    #[test]
    fn element_returns_collection_element_type() {
        let ty = Type::List(Box::new(Type::String));
        assert_eq!(ty.element(), Some(&Type::String));
        assert_eq!(Type::Bool.element(), None);
    }
}
