//! Schema rewriting
//!
//! A single forward pass over the schema lines. The pass is driven by an
//! explicit [`BlockState`]: outside any model nothing is touched; inside a
//! model, field lines are rewritten and the block's `@@map` is emitted when
//! the first block attribute or the closing brace is reached.

pub mod field;
pub mod line;
pub mod model;
pub mod report;

use crate::options::RewriteOptions;
use crate::types::DeclaredModels;
use field::FieldChange;
use line::LineKind;
use model::ModelContext;
use report::RewriteReport;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Result of rewriting a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten schema text
    pub text: String,
    /// What was changed
    pub report: RewriteReport,
}

impl Rewrite {
    /// Returns true if any declaration was rewritten
    ///
    /// Line-ending normalisation alone does not count; compare the text
    /// with the input to detect that.
    pub fn changed(&self) -> bool {
        !self.report.is_empty()
    }
}

/// Line terminator used for the whole output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Pick the output convention for an input text
    pub fn detect(input: &str) -> Self {
        if input.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The terminator itself
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Where the forward pass currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockState {
    /// Between model blocks
    #[default]
    Outside,
    /// Inside the body of a model
    InsideModel(ModelContext),
}

/// Rewrite a whole schema text
pub fn rewrite(input: &str, options: &RewriteOptions) -> Rewrite {
    let ending = LineEnding::detect(input);
    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| match ending {
            LineEnding::CrLf => line.strip_suffix('\r').unwrap_or(line),
            LineEnding::Lf => line,
        })
        .collect();

    let models = declared_models(&lines);
    let mut rewriter = Rewriter::new(&models, options);
    let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());

    for (idx, &line) in lines.iter().enumerate() {
        rewriter.process(line, &lines[idx + 1..], &mut out);
    }

    Rewrite {
        text: out.join(ending.as_str()),
        report: rewriter.finish(),
    }
}

/// Collect the names of every model declared in the schema
fn declared_models(lines: &[&str]) -> DeclaredModels {
    let mut models = DeclaredModels::default();
    for (idx, line) in lines.iter().enumerate() {
        if let LineKind::ModelStart(header) = line::classify(line) {
            let (context, _) = ModelContext::open(&header, &lines[idx + 1..]);
            models.insert(header.name, context.closed);
        }
    }
    models
}

struct Rewriter<'m> {
    models: &'m DeclaredModels,
    options: &'m RewriteOptions,
    state: BlockState,
    report: RewriteReport,
}

impl<'m> Rewriter<'m> {
    fn new(models: &'m DeclaredModels, options: &'m RewriteOptions) -> Self {
        Self {
            models,
            options,
            state: BlockState::Outside,
            report: RewriteReport::default(),
        }
    }

    /// Feed one line; `following` is every line after it
    fn process<'a>(&mut self, line: &'a str, following: &[&str], out: &mut Vec<Cow<'a, str>>) {
        let kind = line::classify(line);

        if let LineKind::ModelStart(header) = &kind {
            // A new header replaces any block left open; that block was
            // never renamed, so there is nothing to record for it
            let (context, renamed) = ModelContext::open(header, following);
            if !context.closed {
                warn!(model = %context.name, "model block is not closed, header left unchanged");
            }
            match renamed {
                Some(header_line) => {
                    debug!(from = %context.original_name, to = %context.name, "renamed model");
                    out.push(Cow::Owned(header_line));
                }
                None => out.push(Cow::Borrowed(line)),
            }
            self.state = BlockState::InsideModel(context);
            return;
        }

        self.state = match std::mem::take(&mut self.state) {
            // Outside a model every line is copied verbatim
            BlockState::Outside => {
                out.push(Cow::Borrowed(line));
                BlockState::Outside
            }
            BlockState::InsideModel(mut model) => match kind {
                // First `@@` line or closing brace ends the block
                LineKind::BlockAttribute | LineKind::BlockEnd => {
                    let map_inserted = model.needs_block_map();
                    if map_inserted {
                        out.push(Cow::Owned(model.block_map_line(line)));
                    }
                    out.push(Cow::Borrowed(line));
                    self.record_model(&model, map_inserted);
                    BlockState::Outside
                }
                LineKind::Field(decl) => {
                    // Stay inside the model whether or not the field changed
                    model.observe(line);
                    let rewritten = field::rewrite_field(
                        &decl,
                        &model.name,
                        self.models,
                        self.options.placement,
                    );
                    match rewritten {
                        Some((new_line, change)) => {
                            self.record_field(change);
                            out.push(Cow::Owned(new_line));
                        }
                        None => out.push(Cow::Borrowed(line)),
                    }
                    BlockState::InsideModel(model)
                }
                _ => {
                    model.observe(line);
                    out.push(Cow::Borrowed(line));
                    BlockState::InsideModel(model)
                }
            },
        };
    }

    fn record_model(&mut self, model: &ModelContext, map_inserted: bool) {
        if let Some(rename) = model.rename(map_inserted) {
            self.report.models.push(rename);
        }
    }

    fn record_field(&mut self, change: FieldChange) {
        match change {
            FieldChange::Renamed(rename) => {
                debug!(
                    model = %rename.model,
                    from = %rename.from,
                    to = %rename.to,
                    map_inserted = rename.map_inserted,
                    "renamed field"
                );
                self.report.fields.push(rename);
            }
            FieldChange::Retyped(retype) => {
                debug!(
                    model = %retype.model,
                    field = %retype.field,
                    from = %retype.from,
                    to = %retype.to,
                    "renamed relation type"
                );
                self.report.relations.push(retype);
            }
        }
    }

    fn finish(self) -> RewriteReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MapPlacement;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> String {
        rewrite(input, &RewriteOptions::default()).text
    }

    #[test]
    fn test_model_map_before_closing_brace() {
        let input = "model gestoria_budget {\n  id String @id\n}\n";
        let expected = "model GestoriaBudget {\n  id String @id\n  @@map(\"gestoria_budget\")\n}\n";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_model_map_before_first_block_attribute() {
        let input = "model tax_model {\n  id Int @id\n  @@index([id])\n  @@unique([id])\n}";
        let expected = "model TaxModel {\n  id Int @id\n  @@map(\"tax_model\")\n  @@index([id])\n  @@unique([id])\n}";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_fields_after_block_attribute_pass_through() {
        let input = "model Cliente {\n  @@index([id])\n  fecha_alta DateTime\n}";
        assert_eq!(run(input), input);
    }

    #[test]
    fn test_lines_outside_models_untouched() {
        let input = "// cabecera\ndatasource db {\n  provider = \"postgresql\"\n  url_env  String\n}\n\nenum estado_pago {\n  PENDIENTE\n}\n";
        assert_eq!(run(input), input);
    }

    #[test]
    fn test_crlf_preserved() {
        let input = "model user_role {\r\n  role_name String\r\n}\r\n";
        let expected = "model UserRole {\r\n  roleName String @map(\"role_name\")\r\n  @@map(\"user_role\")\r\n}\r\n";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_empty_input() {
        let out = rewrite("", &RewriteOptions::default());
        assert_eq!(out.text, "");
        assert!(!out.changed());
    }

    #[test]
    fn test_report_contents() {
        let input = "model factura_item {\n  importe_total Decimal\n  factura Factura_Base @relation(fields: [facturaId], references: [id])\n}\n";
        let out = rewrite(input, &RewriteOptions::default());
        assert_eq!(out.report.models.len(), 1);
        assert!(out.report.models[0].map_inserted);
        assert_eq!(out.report.fields[0].model, "FacturaItem");
        assert_eq!(out.report.relations[0].to, "FacturaBase");
        assert_eq!(out.report.total(), 3);
        assert_eq!(out.report.maps_inserted(), 2);
    }

    #[test]
    fn test_unterminated_model_keeps_header() {
        let input = "model gestoria_budget {\n  fecha_alta DateTime";
        let out = rewrite(input, &RewriteOptions::default());
        assert_eq!(out.text, "model gestoria_budget {\n  fechaAlta DateTime @map(\"fecha_alta\")");
        assert!(out.report.models.is_empty());
        assert_eq!(out.report.fields.len(), 1);
    }

    #[test]
    fn test_model_cut_off_by_next_model_keeps_header() {
        let input = "model budget_line {\n  id Int\nmodel tax_model {\n  id Int\n}\n";
        let expected = "model budget_line {\n  id Int\nmodel TaxModel {\n  id Int\n  @@map(\"tax_model\")\n}\n";
        let out = rewrite(input, &RewriteOptions::default());
        assert_eq!(out.text, expected);
        assert_eq!(out.report.models.len(), 1);
        assert_eq!(out.report.models[0].from, "tax_model");
    }

    #[test]
    fn test_one_line_model_does_not_open_a_block() {
        let input = "model foo_bar {}\nenum e_x {\n  A\n}\n";
        let out = rewrite(input, &RewriteOptions::default());
        assert_eq!(out.text, input);
        assert!(!out.changed());
    }

    #[test]
    fn test_stray_carriage_return_kept_with_lf() {
        assert_eq!(run("// header\r"), "// header\r");
        assert_eq!(run("// a\n// b\r"), "// a\n// b\r");
    }

    #[test]
    fn test_mixed_endings_normalised_without_declaration_changes() {
        let input = "model Cliente {\r\n  id Int\n}\r\n";
        let out = rewrite(input, &RewriteOptions::default());
        assert_eq!(out.text, "model Cliente {\r\n  id Int\r\n}\r\n");
        assert!(!out.changed());
    }

    #[test]
    fn test_existing_block_map_not_duplicated() {
        let input = "model gestoria_budget {\n  id String @id\n  @@map(\"gestoria_budget\")\n}\n";
        let expected = "model GestoriaBudget {\n  id String @id\n  @@map(\"gestoria_budget\")\n}\n";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_placement_last() {
        let input = "model Cliente {\n  fecha_alta DateTime @default(now()) @db.Date\n}";
        let out = rewrite(input, &RewriteOptions::with_placement(MapPlacement::Last));
        assert_eq!(
            out.text,
            "model Cliente {\n  fechaAlta DateTime @default(now()) @db.Date @map(\"fecha_alta\")\n}"
        );
    }

    #[test]
    fn test_line_ending_detect() {
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }
}
