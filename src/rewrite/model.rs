//! Model block handling
//!
//! Tracks the model currently being rewritten, renames snake_case headers
//! to PascalCase and produces the `@@map("original")` line that keeps the
//! table name.

use super::line::{classify, indentation, LineKind, ModelHeader};
use super::report::ModelRename;
use crate::naming::{is_snake_case, to_pascal};

/// Prefix of a model mapping directive
pub const BLOCK_MAP_PREFIX: &str = "@@map(";

/// Indentation used for a synthesized `@@map` when the block gives no hint
pub const DEFAULT_INDENT: &str = "  ";

/// State of the model block currently open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelContext {
    /// Name as declared in the output
    pub name: String,
    /// Name as declared in the input
    pub original_name: String,
    /// The block already carries a `@@map`
    pub has_block_map: bool,
    /// The block reaches a `@@` line or `}` before the next model or EOF
    pub closed: bool,
    /// Indentation of the last indented line seen in the block
    pub indent: Option<String>,
}

impl ModelContext {
    /// Open a model from its header, looking ahead through the block body
    ///
    /// Returns the context and the header line to emit when it changed. A
    /// block that never closes keeps its original header, since there would
    /// be no place to put the `@@map`.
    pub fn open(header: &ModelHeader<'_>, body: &[&str]) -> (Self, Option<String>) {
        let original_name = header.name.to_string();
        let pascal = to_pascal(header.name);
        let scan = scan_body(body);

        let (name, line) = if is_snake_case(header.name) && !pascal.is_empty() && scan.closed {
            let line = header.render(&pascal);
            (pascal, Some(line))
        } else {
            (original_name.clone(), None)
        };

        let context = Self {
            name,
            original_name,
            has_block_map: scan.has_block_map,
            closed: scan.closed,
            indent: None,
        };
        (context, line)
    }

    /// Returns true if closing this block must emit a `@@map` line
    pub fn needs_block_map(&self) -> bool {
        self.name != self.original_name && !self.has_block_map
    }

    /// Remember the indentation of a line inside the block
    pub fn observe(&mut self, line: &str) {
        let indent = indentation(line);
        if !indent.is_empty() && indent.len() < line.len() {
            self.indent = Some(indent.to_string());
        }
    }

    /// Build the `@@map` line, indented like `trigger` or the block body
    pub fn block_map_line(&self, trigger: &str) -> String {
        let own = indentation(trigger);
        let indent = if !own.is_empty() {
            own
        } else {
            self.indent.as_deref().unwrap_or(DEFAULT_INDENT)
        };
        format!("{}{}\"{}\")", indent, BLOCK_MAP_PREFIX, self.original_name)
    }

    /// Report entry for this model, if it was renamed
    pub fn rename(&self, map_inserted: bool) -> Option<ModelRename> {
        (self.name != self.original_name).then(|| ModelRename {
            from: self.original_name.clone(),
            to: self.name.clone(),
            map_inserted,
        })
    }
}

/// What the lookahead found in a block body
#[derive(Debug, Default, PartialEq, Eq)]
struct BodyScan {
    closed: bool,
    has_block_map: bool,
}

/// Look ahead through the block body starting at `body`
///
/// The block closes at its first `@@` line or `}`; the `@@map` search runs
/// on to the closing brace. Both stop at the next model header.
fn scan_body(body: &[&str]) -> BodyScan {
    let mut scan = BodyScan::default();
    for line in body {
        match classify(line) {
            LineKind::ModelStart(_) => break,
            LineKind::BlockEnd => {
                scan.closed = true;
                break;
            }
            LineKind::BlockAttribute => {
                scan.closed = true;
                if line.trim_start().starts_with(BLOCK_MAP_PREFIX) {
                    scan.has_block_map = true;
                    break;
                }
            }
            _ => {}
        }
    }
    scan
}
