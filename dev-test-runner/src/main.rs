//! Fixture runner: infer each template in `fixtures/manifest.json` and compare
//! the rendered description against the expected file next to it.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use hbs_osi::codegen::Codegen;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Case {
    template: String,
    root_type: String,
    #[serde(default)]
    keyword: String,
    expected: String,
}

fn run_case(dir: &Path, case: &Case) -> Result<bool> {
    let template = std::fs::read_to_string(dir.join(&case.template))
        .with_context(|| format!("reading {}", case.template))?;
    let expected = std::fs::read_to_string(dir.join(&case.expected))
        .with_context(|| format!("reading {}", case.expected))?;

    let schema = hbs_osi::infer(&template);
    let mut cg = Codegen::with_keyword(case.keyword.as_str());
    cg.emit(&schema, &case.root_type);
    let actual = cg.into_string();

    if actual.trim_end() == expected.trim_end() {
        eprintln!("{} {}", "✅".green(), case.template);
        return Ok(true);
    }
    eprintln!("{} {}", "❌".red(), case.template.bold());
    eprintln!("—— expected ——\n{}", expected.trim_end());
    eprintln!("—— actual ——\n{actual}");
    Ok(false)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"));
    let manifest = std::fs::read_to_string(dir.join("manifest.json"))
        .with_context(|| format!("reading manifest in {}", dir.display()))?;
    let cases: Vec<Case> = serde_json::from_str(&manifest).context("parsing manifest.json")?;

    let mut failed = 0usize;
    for case in &cases {
        if !run_case(&dir, case)? {
            failed += 1;
        }
    }
    eprintln!("{} passed, {} failed", cases.len() - failed, failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
