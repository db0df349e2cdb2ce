//! Command handling for the `questsmith` binary.
//!
//! Each command returns its output as a string so it can be exercised
//! without spawning the binary.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use questsmith_content::{item_schema, status_flags, target_flags};
use questsmith_flags::FlagUniverse;
use questsmith_form::{EditSession, FormSchema, Kind, TypeGatedForm};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "questsmith")]
#[command(about = "Inspect Questsmith form schemas and flag universes")]
pub struct Cli {
    /// Schema file (TOML). Defaults to the built-in item schema plus the
    /// skill flag universes.
    #[arg(long, global = true)]
    pub schema: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with flag universes
    Flags {
        #[command(subcommand)]
        action: FlagsCommand,
    },
    /// Show which groups and fields a kind enables
    Fields {
        #[arg(long, allow_negative_numbers = true)]
        kind: i64,
    },
    /// Validate a JSON record and print what would be submitted
    Check {
        /// JSON object of field values; `kind` and `flags` keys are optional
        record: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlagsCommand {
    /// List a universe's flags and their values
    List {
        #[arg(short, long)]
        universe: String,
    },
    /// Pack flag names into an integer
    Encode {
        #[arg(short, long)]
        universe: String,
        flags: Vec<String>,
    },
    /// Unpack an integer into flag names
    Decode {
        #[arg(short, long)]
        universe: String,
        value: u64,
        /// Fail if the value has bits the universe does not define
        #[arg(long)]
        strict: bool,
    },
}

/// The schema used when no `--schema` file is given.
pub fn default_schema() -> Arc<FormSchema> {
    let mut schema = (*item_schema()).clone();
    schema
        .universes
        .extend([status_flags().clone(), target_flags().clone()]);
    Arc::new(schema)
}

pub fn load_schema(path: Option<&Path>) -> Result<Arc<FormSchema>> {
    let Some(path) = path else {
        return Ok(default_schema());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let schema = FormSchema::from_toml_str(&text)
        .with_context(|| format!("loading schema {}", path.display()))?;
    info!(
        "Loaded schema {} ({} fields, {} groups, {} universes)",
        path.display(),
        schema.fields.len(),
        schema.groups.len(),
        schema.universes.len()
    );
    Ok(Arc::new(schema))
}

/// Runs a parsed command line and returns what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    let schema = load_schema(cli.schema.as_deref())?;
    match &cli.command {
        Command::Flags { action } => run_flags(&schema, action),
        Command::Fields { kind } => Ok(fields(schema, Kind(*kind))),
        Command::Check { record } => check(schema, record),
    }
}

fn universe<'a>(schema: &'a FormSchema, name: &str) -> Result<&'a FlagUniverse> {
    schema.universe(name).ok_or_else(|| {
        let known: Vec<&str> = schema.universes.iter().map(FlagUniverse::name).collect();
        anyhow!("unknown flag universe '{name}' (known: {})", known.join(", "))
    })
}

fn run_flags(schema: &FormSchema, action: &FlagsCommand) -> Result<String> {
    match action {
        FlagsCommand::List { universe: name } => {
            let lines: Vec<String> = universe(schema, name)?
                .iter()
                .map(|f| format!("{}\t{}", f.name, f.value))
                .collect();
            Ok(lines.join("\n"))
        }
        FlagsCommand::Encode {
            universe: name,
            flags,
        } => {
            let value = universe(schema, name)?.encode(flags)?;
            debug!("Encoded {:?} in '{}' as {}", flags, name, value);
            Ok(value.to_string())
        }
        FlagsCommand::Decode {
            universe: name,
            value,
            strict,
        } => {
            let u = universe(schema, name)?;
            let set = if *strict {
                u.decode_strict(*value)?
            } else {
                u.decode(*value)
            };
            Ok(set.names().join("\n"))
        }
    }
}

fn fields(schema: Arc<FormSchema>, kind: Kind) -> String {
    let mut form = TypeGatedForm::new(schema);
    form.set_kind(Some(kind));

    let groups = form.active_groups();
    let mut out = vec![format!(
        "groups: {}",
        if groups.is_empty() {
            "-".to_string()
        } else {
            groups.join(", ")
        }
    )];
    out.extend(form.enabled_fields().into_iter().map(str::to_string));
    out.join("\n")
}

fn check(schema: Arc<FormSchema>, path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading record {}", path.display()))?;
    let record: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing record {}", path.display()))?;
    let Value::Object(entries) = record else {
        bail!("record {} is not a JSON object", path.display());
    };

    let mut session = EditSession::new(schema);
    for (key, value) in entries {
        match key.as_str() {
            "kind" => {
                let kind = value
                    .as_i64()
                    .ok_or_else(|| anyhow!("kind must be an integer, got {value}"))?;
                session.set_kind(Some(Kind(kind)));
            }
            "flags" => {
                let Value::Object(universes) = value else {
                    bail!("flags must be an object of universe -> integer");
                };
                for (name, packed) in universes {
                    let packed = packed
                        .as_u64()
                        .ok_or_else(|| anyhow!("flags.{name} must be a non-negative integer"))?;
                    session.load_flags(&name, packed)?;
                }
            }
            _ => session.set_value(&key, value)?,
        }
    }

    let submitted = session.submit()?;
    Ok(serde_json::to_string_pretty(&submitted)?)
}
