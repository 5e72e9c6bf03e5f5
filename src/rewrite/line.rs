//! Line classification
//!
//! Each schema line is classified by scanning tokens from the left. A line
//! that does not fit any recognised shape is [`LineKind::Other`] and is
//! passed through untouched by the rewriter.

/// Keyword opening a model block
pub const MODEL_KEYWORD: &str = "model";

/// Marker introducing a block-level attribute (`@@index`, `@@map`, ...)
pub const BLOCK_ATTRIBUTE_MARKER: &str = "@@";

/// Marker closing a model block
pub const BLOCK_END: &str = "}";

/// Classification of a single schema line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `model <Name> {`
    ModelStart(ModelHeader<'a>),
    /// A line whose trimmed content starts with `@@`
    BlockAttribute,
    /// A line that is only `}`
    BlockEnd,
    /// `<indent><name><ws><type><rest>`
    Field(FieldLine<'a>),
    /// Anything else: blanks, comments, decorators, enum members, ...
    Other,
}

/// The pieces of a model declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHeader<'a> {
    /// Whitespace between the keyword and the name
    pub gap: &'a str,
    /// Declared model name
    pub name: &'a str,
    /// Everything after the name: optional whitespace, `{`, optional comment
    pub tail: &'a str,
}

impl ModelHeader<'_> {
    /// Render the header with a different model name
    pub fn render(&self, name: &str) -> String {
        format!("{}{}{}{}", MODEL_KEYWORD, self.gap, name, self.tail)
    }
}

/// The pieces of a field declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine<'a> {
    /// Leading indentation
    pub indent: &'a str,
    /// Field name
    pub name: &'a str,
    /// Whitespace between name and type
    pub gap: &'a str,
    /// Type token, without `?` or `[]` modifiers
    pub type_name: &'a str,
    /// Modifiers, directives and trailing comment
    pub rest: &'a str,
}

impl FieldLine<'_> {
    /// Render the field with a replacement name, type and remainder
    pub fn render(&self, name: &str, type_name: &str, rest: &str) -> String {
        format!("{}{}{}{}{}", self.indent, name, self.gap, type_name, rest)
    }
}

/// Classify one line (without its line terminator)
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(header) = parse_model_header(line) {
        return LineKind::ModelStart(header);
    }

    let trimmed = line.trim();
    if trimmed.starts_with(BLOCK_ATTRIBUTE_MARKER) {
        return LineKind::BlockAttribute;
    }
    if trimmed == BLOCK_END {
        return LineKind::BlockEnd;
    }

    match parse_field(line) {
        Some(field) => LineKind::Field(field),
        None => LineKind::Other,
    }
}

/// Leading whitespace of a line
pub fn indentation(line: &str) -> &str {
    split_while(line, char::is_whitespace).0
}

fn parse_model_header(line: &str) -> Option<ModelHeader<'_>> {
    let rest = line.strip_prefix(MODEL_KEYWORD)?;

    let (gap, rest) = split_while(rest, char::is_whitespace);
    if gap.is_empty() {
        return None;
    }

    let (name, tail) = split_while(rest, is_word_char);
    if name.is_empty() {
        return None;
    }

    // The brace must end the line; only a comment may follow it
    let after = tail.trim_start().strip_prefix('{')?.trim_start();
    if !after.is_empty() && !after.starts_with("//") {
        return None;
    }

    Some(ModelHeader { gap, name, tail })
}

fn parse_field(line: &str) -> Option<FieldLine<'_>> {
    let (indent, rest) = split_while(line, char::is_whitespace);
    let (name, rest) = split_while(rest, is_word_char);
    let (gap, rest) = split_while(rest, char::is_whitespace);
    let (type_name, rest) = split_while(rest, is_word_char);

    if indent.is_empty() || name.is_empty() || gap.is_empty() || type_name.is_empty() {
        return None;
    }

    Some(FieldLine {
        indent,
        name,
        gap,
        type_name,
        rest,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}
