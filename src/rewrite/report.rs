//! Record of the changes made by a rewrite

/// A model renamed to PascalCase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRename {
    /// Original (storage) name
    pub from: String,
    /// New declared name
    pub to: String,
    /// Whether a `@@map` line was synthesized for it
    pub map_inserted: bool,
}

/// A scalar field renamed to camelCase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRename {
    /// Declared name of the enclosing model, after renaming
    pub model: String,
    /// Original (storage) name
    pub from: String,
    /// New declared name
    pub to: String,
    /// Whether a `@map` directive was inserted
    pub map_inserted: bool,
}

/// A relation field whose referenced type was renamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRetype {
    /// Declared name of the enclosing model, after renaming
    pub model: String,
    /// Field name (unchanged)
    pub field: String,
    /// Original type name
    pub from: String,
    /// New type name
    pub to: String,
}

/// Everything a rewrite changed, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Renamed models
    pub models: Vec<ModelRename>,
    /// Renamed scalar fields
    pub fields: Vec<FieldRename>,
    /// Retyped relation fields
    pub relations: Vec<RelationRetype>,
}

impl RewriteReport {
    /// Returns true if nothing was changed
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Total number of changed declarations
    pub fn total(&self) -> usize {
        self.models.len() + self.fields.len() + self.relations.len()
    }

    /// Number of `@map`/`@@map` directives inserted
    pub fn maps_inserted(&self) -> usize {
        let models = self.models.iter().filter(|m| m.map_inserted).count();
        let fields = self.fields.iter().filter(|f| f.map_inserted).count();
        models + fields
    }
}
