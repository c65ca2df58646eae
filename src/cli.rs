//! Minimal CLI: infer → (describe | schema)
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::InputError;
use crate::ir::Schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer the data shape of logic-less templates and output either a type description or a JSON schema-ish view
#[derive(Parser, Debug)]
#[command(name = "hbs-osi", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print a type-declaration description
    Describe(DescribeOut),
    /// infer and print the JSON-schema-ish view
    Schema(JsonSchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DescribeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// top-level type name
    #[arg(long, default_value = "TemplateData")]
    root_type: String,

    /// declaration keyword placed before the root type name ('' for none)
    #[arg(long, default_value = "interface")]
    keyword: String,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct JsonSchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One loaded template.
#[derive(Debug)]
struct Source {
    name: String,
    text: String,
}

#[derive(Serialize)]
struct SchemaReport<'a> {
    source: &'a str,
    schema: serde_json::Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Source>, InputError> {
        let mut sources = Vec::new();
        for raw in &self.input {
            if raw == "-" {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| InputError::Read { path: PathBuf::from("-"), source })?;
                sources.push(Source { name: "<stdin>".to_string(), text });
                continue;
            }
            for path in resolve_file_path_patterns([raw])? {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| InputError::Read { path: path.clone(), source })?;
                sources.push(Source { name: path.to_string_lossy().to_string(), text });
            }
        }
        if sources.is_empty() {
            return Err(InputError::Empty);
        }
        tracing::info!(count = sources.len(), "loaded templates");
        Ok(sources)
    }

    /// Each template is independent, so inference runs in parallel. Output
    /// keeps input order.
    fn infer_all(&self) -> Result<Vec<(Source, Schema)>, InputError> {
        let sources = self.load()?;
        Ok(sources
            .into_par_iter()
            .map(|source| {
                let schema = crate::inference::infer(&source.text);
                tracing::debug!(source = %source.name, fields = schema.root.len(), "inferred");
                (source, schema)
            })
            .collect())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Describe(target) => {
                let results = target.input_settings.infer_all()?;
                let banners = results.len() > 1;
                let colorize = target.out.is_none();
                let mut blocks = Vec::with_capacity(results.len());
                for (source, schema) in &results {
                    let mut cg = crate::codegen::Codegen::with_keyword(target.keyword.as_str());
                    cg.emit(schema, &target.root_type);
                    let body = cg.into_string();
                    if banners {
                        let banner = format!("// {}", source.name);
                        let banner = if colorize { banner.dimmed().to_string() } else { banner };
                        blocks.push(format!("{banner}\n{body}"));
                    } else {
                        blocks.push(body);
                    }
                }
                write_output(target.out.as_ref(), &blocks.join("\n\n"))
            }
            Command::Schema(target) => {
                let results = target.input_settings.infer_all()?;
                let value = match results.as_slice() {
                    [(_, schema)] => crate::json_schema::emit_schema(schema),
                    many => serde_json::to_value(
                        many.iter()
                            .map(|(source, schema)| SchemaReport {
                                source: &source.name,
                                schema: crate::json_schema::emit_schema(schema),
                            })
                            .collect::<Vec<_>>(),
                    )?,
                };
                let schema_src = serde_json::to_string_pretty(&value)?;
                write_output(target.out.as_ref(), &schema_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, contents: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        println!("{contents}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, format!("{contents}\n"))
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "wrote output");
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| InputError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            let before = out.len();
            for entry in entries {
                out.push(entry?);
            }
            if out.len() == before {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(InputError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
