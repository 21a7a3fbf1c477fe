//! atomicdoc: render an Atomic Red Team technique YAML file as the
//! published markdown document. Title, ATT&CK description blockquote,
//! table of contents, one section per atomic test.

mod fields;
mod mitre;
mod model;
mod render;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Technique identifiers look like `T1059` or `T1059.004`.
static RE_TECHNIQUE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^T\d{4}(\.\d{3})?$").unwrap());

#[derive(Parser)]
#[command(
    name = "atomicdoc",
    about = "Render an Atomic Red Team technique YAML file as markdown"
)]
struct Cli {
    /// Path to the technique YAML file (Txxxx.yaml)
    yaml_file: PathBuf,

    /// Output path (default: the input path with its extension set to .md)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Local text file with the ATT&CK description for the header
    #[arg(long)]
    attack_desc_file: Option<PathBuf>,

    /// Fetch the ATT&CK description from attack.mitre.org (best effort,
    /// needs the `fetch` build feature; ignored when --attack-desc-file
    /// is given)
    #[arg(long)]
    fetch_mitre: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.yaml_file)
        .with_context(|| format!("failed to read {}", cli.yaml_file.display()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse {}", cli.yaml_file.display()))?;
    let doc = model::Document::from_yaml(&value)
        .with_context(|| format!("invalid document structure in {}", cli.yaml_file.display()))?;

    if !RE_TECHNIQUE_ID.is_match(&doc.technique) {
        eprintln!(
            "warning: attack_technique {:?} does not look like a technique id (T#### or T####.###)",
            doc.technique
        );
    }

    let attack_desc = resolve_description(&cli, &doc)?;
    let markdown = render::render(&doc, attack_desc.as_deref());

    let out_path = cli
        .out
        .clone()
        .unwrap_or_else(|| cli.yaml_file.with_extension("md"));
    fs::write(&out_path, &markdown)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("Wrote: {}", out_path.display());

    Ok(())
}

/// Resolve the optional header description. An explicit local file wins over
/// the remote fetch, and the fetch is only attempted for a non-empty
/// technique id.
fn resolve_description(cli: &Cli, doc: &model::Document) -> Result<Option<String>> {
    if let Some(path) = &cli.attack_desc_file {
        return Ok(Some(mitre::from_file(path)?));
    }
    if cli.fetch_mitre && !doc.technique.is_empty() {
        return Ok(mitre::fetch_description(&doc.technique));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technique_id_shapes() {
        assert!(RE_TECHNIQUE_ID.is_match("T1059"));
        assert!(RE_TECHNIQUE_ID.is_match("T1059.004"));
        assert!(RE_TECHNIQUE_ID.is_match("t1059.004"));
        assert!(!RE_TECHNIQUE_ID.is_match(""));
        assert!(!RE_TECHNIQUE_ID.is_match("T105"));
        assert!(!RE_TECHNIQUE_ID.is_match("T10590"));
        assert!(!RE_TECHNIQUE_ID.is_match("T1059.0004"));
        assert!(!RE_TECHNIQUE_ID.is_match("T1059-004"));
    }
}
