//! Markdown renderer for a technique document.
//!
//! The document is assembled as a vector of line entries and joined once at
//! the end. Generated files get diffed against previously published
//! documents, so the blank-line cadence between blocks is part of the output
//! contract: each `push` below fills one slot of the template, a single
//! physical line except where description or command text carries embedded
//! newlines.

use crate::fields::{
    code_fence_lang, elevation_suffix, escape_inline, escape_table, format_platforms,
};
use crate::model::{AtomicTest, Document};
use crate::toc;

/// Render the complete markdown document.
///
/// `attack_desc` is the optional header enrichment resolved by the caller;
/// the renderer itself never does IO.
pub fn render(doc: &Document, attack_desc: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {} - {}", doc.technique, doc.display_name));
    lines.push(format!(
        "## [Description from ATT&CK](https://attack.mitre.org/techniques/{})",
        doc.technique
    ));
    lines.push("<blockquote>".to_string());
    lines.push(String::new());
    lines.push(escape_inline(attack_desc));
    lines.push(String::new());
    lines.push("</blockquote>".to_string());
    lines.push(String::new());
    lines.push("## Atomic Tests".to_string());
    lines.push(String::new());

    for (idx, test) in doc.tests.iter().enumerate() {
        lines.push(toc::toc_entry(&section_heading(idx + 1, test)));
        lines.push(String::new());
    }
    lines.push(String::new());
    lines.push("<br/>".to_string());
    lines.push(String::new());

    for (idx, test) in doc.tests.iter().enumerate() {
        render_test(&mut lines, idx + 1, test);
    }
    lines.push("<br/>".to_string());

    let joined = lines.join("\n");
    format!("{}\n", joined.trim_end())
}

/// Heading text shared by the TOC entry and the section title.
///
/// A test with no name falls back to its positional placeholder, so an
/// unnamed third test reads `Atomic Test #3 - Atomic Test #3`.
fn section_heading(index: usize, test: &AtomicTest) -> String {
    let name = match test.name.as_deref() {
        Some(name) => escape_inline(Some(name)),
        None => format!("Atomic Test #{index}"),
    };
    format!("Atomic Test #{index} - {name}")
}

fn render_test(lines: &mut Vec<String>, index: usize, test: &AtomicTest) {
    lines.push(format!("## {}", section_heading(index, test)));

    if let Some(desc) = test.description.as_deref() {
        if !desc.is_empty() {
            lines.push(escape_inline(Some(desc)));
            lines.push(String::new());
        }
    }

    if !test.supported_platforms.is_empty() {
        lines.push(format!(
            "**Supported Platforms:** {}",
            format_platforms(&test.supported_platforms)
        ));
        lines.push(String::new());
    }

    let guid = escape_inline(test.auto_generated_guid.as_deref());
    if !guid.is_empty() {
        lines.push(format!("**auto_generated_guid:** {guid}"));
        lines.push(String::new());
    }

    // The template carries four spacer lines between the metadata and the
    // inputs table.
    for _ in 0..4 {
        lines.push(String::new());
    }

    if !test.input_arguments.is_empty() {
        lines.push("#### Inputs:".to_string());
        lines.push("| Name | Description | Type | Default Value |".to_string());
        lines.push("|------|-------------|------|---------------|".to_string());
        for (name, arg) in &test.input_arguments {
            // No space before the closing pipe; the template has none.
            lines.push(format!(
                "| {} | {} | {} | {}|",
                escape_inline(Some(name)),
                escape_inline(arg.description.as_deref()),
                escape_inline(arg.arg_type.as_deref()),
                escape_table(arg.default.as_deref()),
            ));
        }
        lines.push(String::new());
        lines.push(String::new());
    }

    let executor = &test.executor;
    let name = escape_inline(executor.name.as_deref());
    if name.is_empty() {
        lines.push("#### Attack Commands:".to_string());
    } else {
        lines.push(format!(
            "#### Attack Commands: Run with `{}`!{}",
            name,
            elevation_suffix(executor.elevation_required)
        ));
    }
    lines.push(String::new());

    let lang = code_fence_lang(executor.name.as_deref());
    if let Some(command) = executor.command.as_deref() {
        if !command.is_empty() {
            lines.push(format!("```{lang}"));
            lines.push(escape_inline(Some(command)));
            lines.push("```".to_string());
            lines.push(String::new());
        }
    }

    if let Some(cleanup) = executor.cleanup_command.as_deref() {
        if !cleanup.is_empty() {
            lines.push("#### Cleanup Commands:".to_string());
            lines.push(format!("```{lang}"));
            lines.push(escape_inline(Some(cleanup)));
            lines.push("```".to_string());
            lines.push(String::new());
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.push("<br/>".to_string());
    lines.push("<br/>".to_string());
    lines.push(String::new());
}
