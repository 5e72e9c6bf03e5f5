//! prisma-mapper - rewrite snake_case Prisma schemas to client-friendly names
//!
//! Reads a schema file, renames snake_case models and fields, adds the
//! `@map`/`@@map` directives that keep the database names, writes a backup
//! and replaces the schema in place.

use anyhow::{Context, Result};
use clap::Parser;
use prisma_mapper::apply::{self, ApplyOptions, DEFAULT_BACKUP_SUFFIX, DEFAULT_SCHEMA_PATH};
use prisma_mapper::{MapPlacement, RewriteOptions, RewriteReport};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PRISMA_MAPPER_LOG";

#[derive(Debug, Parser)]
#[command(name = "prisma-mapper", version, about)]
struct Cli {
    /// Schema file to rewrite
    #[arg(env = "PRISMA_SCHEMA", default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Suffix for the backup copy written next to the schema
    #[arg(long, default_value = DEFAULT_BACKUP_SUFFIX)]
    backup_suffix: String,

    /// Do not write a backup copy
    #[arg(long)]
    no_backup: bool,

    /// Report what would change without writing anything
    #[arg(long, conflicts_with = "stdout")]
    dry_run: bool,

    /// Print the rewritten schema to stdout instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Where @map goes on lines that already have directives: first or last
    #[arg(long, default_value = "first", value_parser = ["first", "last"])]
    placement: String,

    /// Enable debug logging of every rename
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("prisma-mapper: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let rewrite = RewriteOptions::with_placement(MapPlacement::from_str(&cli.placement));

    if cli.stdout {
        let original = apply::read_schema(&cli.schema)?;
        let result = prisma_mapper::rewrite_schema_with(&original, &rewrite);
        io::stdout()
            .write_all(result.text.as_bytes())
            .context("failed to write rewritten schema to stdout")?;
        return Ok(());
    }

    let options = ApplyOptions {
        rewrite,
        backup_suffix: (!cli.no_backup).then_some(cli.backup_suffix),
        dry_run: cli.dry_run,
    };

    let outcome = apply::apply_to_file(&cli.schema, &options)
        .with_context(|| format!("could not rewrite {}", cli.schema.display()))?;

    if !outcome.changed {
        println!("{} already uses mapped names, nothing to do", outcome.path.display());
        return Ok(());
    }

    // Only line endings differ
    let normalised_only = outcome.report.is_empty();
    if normalised_only {
        println!("No declarations renamed; line endings normalised");
    } else {
        print_summary(&outcome.report);
    }

    if cli.dry_run {
        println!("Dry run: {} was not modified", outcome.path.display());
        return Ok(());
    }

    println!("Schema updated: {}", outcome.path.display());
    if let Some(backup) = &outcome.backup {
        println!("Backup saved to {}", backup.display());
    }
    if !normalised_only {
        println!();
        println!("Next: run `npx prisma generate`");
    }

    Ok(())
}

fn print_summary(report: &RewriteReport) {
    for model in &report.models {
        println!("  model {} -> {}", model.from, model.to);
    }
    for field in &report.fields {
        println!("  field {}.{} -> {}", field.model, field.from, field.to);
    }
    for relation in &report.relations {
        println!(
            "  relation {}.{}: {} -> {}",
            relation.model, relation.field, relation.from, relation.to
        );
    }
    println!(
        "{} models, {} fields, {} relations rewritten ({} map directives added)",
        report.models.len(),
        report.fields.len(),
        report.relations.len(),
        report.maps_inserted()
    );
}
