//! Field declaration rewriting
//!
//! Scalar fields with snake_case names are renamed to camelCase and get a
//! `@map("original")` directive. Relation fields pointing at a snake_case
//! model keep their name and only have the type renamed to PascalCase.

use super::line::FieldLine;
use super::report::{FieldRename, RelationRetype};
use crate::naming::{is_snake_case, to_camel, to_pascal};
use crate::options::MapPlacement;
use crate::types::{DeclaredModels, TypeKind};
use std::borrow::Cow;

/// Prefix of a field mapping directive
pub const FIELD_MAP_PREFIX: &str = "@map(";

/// What changed on a rewritten field line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Scalar field renamed to camelCase
    Renamed(FieldRename),
    /// Relation field whose type was renamed to PascalCase
    Retyped(RelationRetype),
}

/// Build the `@map("...")` directive for a field
pub fn map_directive(original: &str) -> String {
    format!("{}\"{}\")", FIELD_MAP_PREFIX, original)
}

/// Rewrite a field declaration inside `model`
///
/// Returns None when the line passes through unchanged.
pub fn rewrite_field(
    field: &FieldLine<'_>,
    model: &str,
    models: &DeclaredModels,
    placement: MapPlacement,
) -> Option<(String, FieldChange)> {
    let kind = TypeKind::classify(field.type_name, models);

    if is_snake_case(field.name) && !kind.is_relation() {
        let camel = to_camel(field.name);
        if camel.is_empty() {
            return None;
        }

        // An existing @map wins; only the name changes
        let directives = Directives::scan(field.rest);
        let (rest, map_inserted) = if directives.has_map(field.rest) {
            (Cow::Borrowed(field.rest), false)
        } else {
            let rest = insert_map(field.rest, &directives, field.name, placement);
            (Cow::Owned(rest), true)
        };

        let line = field.render(&camel, field.type_name, &rest);
        let change = FieldChange::Renamed(FieldRename {
            model: model.to_string(),
            from: field.name.to_string(),
            to: camel,
            map_inserted,
        });
        return Some((line, change));
    }

    let retype = kind.is_relation() && !models.keeps_name(field.type_name);
    if retype && is_snake_case(field.type_name) {
        let pascal = to_pascal(field.type_name);
        if pascal.is_empty() {
            return None;
        }

        let line = field.render(field.name, &pascal, field.rest);
        let change = FieldChange::Retyped(RelationRetype {
            model: model.to_string(),
            field: field.name.to_string(),
            from: field.type_name.to_string(),
            to: pascal,
        });
        return Some((line, change));
    }

    None
}

/// Directive positions within a field remainder
#[derive(Debug, Default, PartialEq, Eq)]
struct Directives {
    /// Byte offsets of each `@` that opens a directive
    starts: Vec<usize>,
    /// Offset where a trailing `//` comment begins, or the remainder length
    end: usize,
}

impl Directives {
    /// Scan a remainder for directive markers
    ///
    /// `@` only opens a directive outside string literals and argument
    /// lists, and scanning stops at a trailing `//` comment.
    fn scan(rest: &str) -> Self {
        let mut starts = Vec::new();
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut chars = rest.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => in_string = true,
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                '@' if depth == 0 => starts.push(idx),
                '/' if matches!(chars.peek(), Some(&(_, '/'))) => {
                    return Self { starts, end: idx };
                }
                _ => {}
            }
        }

        Self {
            starts,
            end: rest.len(),
        }
    }

    fn has_map(&self, rest: &str) -> bool {
        self.starts
            .iter()
            .any(|&start| rest[start..].starts_with(FIELD_MAP_PREFIX))
    }
}

fn insert_map(
    rest: &str,
    directives: &Directives,
    original: &str,
    placement: MapPlacement,
) -> String {
    let map = map_directive(original);

    // Ahead of the first directive, keeping the ones after it in order
    if let (MapPlacement::First, Some(&pos)) = (placement, directives.starts.first()) {
        let (head, tail) = rest.split_at(pos);
        let sep = if head.ends_with(char::is_whitespace) {
            ""
        } else {
            " "
        };
        return format!("{}{}{} {}", head, sep, map, tail);
    }

    // Otherwise after the last directive, before any trailing comment
    let pos = rest[..directives.end].trim_end().len();
    let (head, tail) = rest.split_at(pos);
    format!("{} {}{}", head, map, tail)
}
