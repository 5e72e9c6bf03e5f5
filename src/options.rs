//! Rewrite options
//!
//! Controls where the inserted `@map` directive lands on a field line that
//! already carries other directives.

/// Where `@map("...")` goes among a field's existing directives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapPlacement {
    /// Before the first existing directive (default)
    #[default]
    First,
    /// After the last existing directive
    Last,
}

impl MapPlacement {
    /// Parse a placement from a string option
    ///
    /// Unknown values fall back to [`MapPlacement::First`].
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "last" | "append" => MapPlacement::Last,
            _ => MapPlacement::First,
        }
    }

    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            MapPlacement::First => "first",
            MapPlacement::Last => "last",
        }
    }
}

/// Options for a single schema rewrite
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Placement of inserted field mapping directives
    pub placement: MapPlacement,
}

impl RewriteOptions {
    /// Options with the given placement policy
    pub fn with_placement(placement: MapPlacement) -> Self {
        Self { placement }
    }
}
