//! Field type classification
//!
//! Decides whether the type token of a field declaration names a built-in
//! scalar or references another model. Only scalar fields get a camelCase
//! name plus `@map`; relation fields keep their name and have the
//! referenced type renamed instead.

use std::collections::HashSet;

/// Prisma built-in scalar types
pub const SCALAR_TYPES: &[&str] = &[
    "String",
    "Boolean",
    "Int",
    "BigInt",
    "Float",
    "Decimal",
    "DateTime",
    "Json",
    "Bytes",
    "Unsupported",
];

/// Model names declared in the schema being rewritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredModels {
    names: HashSet<String>,
    unclosed: HashSet<String>,
}

impl DeclaredModels {
    /// Record a model header; `closed` is false when its block never ends
    pub fn insert(&mut self, name: &str, closed: bool) {
        self.names.insert(name.to_string());
        if !closed {
            self.unclosed.insert(name.to_string());
        }
    }

    /// Returns true if a model with this name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns true if the model keeps its declared name
    ///
    /// Models whose block never closes are not renamed, so references to
    /// them must not be renamed either.
    pub fn keeps_name(&self, name: &str) -> bool {
        self.unclosed.contains(name)
    }
}

/// What a field's type token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A primitive column type
    Scalar,
    /// A reference to another model (or a named type declared elsewhere)
    Relation,
}

impl TypeKind {
    /// Classify a type token
    ///
    /// `models` holds the model names declared in the schema being
    /// rewritten, so lowercase snake_case model references are still
    /// recognised as relations.
    pub fn classify(type_name: &str, models: &DeclaredModels) -> Self {
        if SCALAR_TYPES.contains(&type_name) {
            return TypeKind::Scalar;
        }
        if models.contains(type_name) {
            return TypeKind::Relation;
        }
        match type_name.chars().next() {
            Some(c) if c.is_uppercase() => TypeKind::Relation,
            _ => TypeKind::Scalar,
        }
    }

    /// Returns true for relation references
    pub fn is_relation(self) -> bool {
        self == TypeKind::Relation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(names: &[&str]) -> DeclaredModels {
        let mut models = DeclaredModels::default();
        for name in names {
            models.insert(name, true);
        }
        models
    }

    #[test]
    fn test_builtin_scalars() {
        let none = models(&[]);
        for ty in SCALAR_TYPES {
            assert_eq!(TypeKind::classify(ty, &none), TypeKind::Scalar, "{}", ty);
        }
    }

    #[test]
    fn test_uppercase_is_relation() {
        let none = models(&[]);
        assert_eq!(TypeKind::classify("Cliente", &none), TypeKind::Relation);
        assert_eq!(
            TypeKind::classify("Cliente_Empresa", &none),
            TypeKind::Relation
        );
    }

    #[test]
    fn test_lowercase_is_scalar_unless_declared() {
        let declared = models(&["gestoria_budget"]);
        assert_eq!(TypeKind::classify("text", &declared), TypeKind::Scalar);
        assert_eq!(
            TypeKind::classify("gestoria_budget", &declared),
            TypeKind::Relation
        );
        assert!(TypeKind::classify("gestoria_budget", &declared).is_relation());
    }

    #[test]
    fn test_unclosed_models_keep_their_name() {
        let mut declared = DeclaredModels::default();
        declared.insert("budget_line", false);
        declared.insert("tax_model", true);
        assert!(declared.contains("budget_line"));
        assert!(declared.keeps_name("budget_line"));
        assert!(!declared.keeps_name("tax_model"));
    }
}
