//! ATT&CK description lookup for the document header.
//!
//! Two sources: a local text file named by the user, and an optional fetch
//! from attack.mitre.org compiled in behind the `fetch` feature. The file
//! path fails loudly; the remote path is best effort and collapses every
//! failure (feature absent, network error, bad status, nothing extractable)
//! into `None`, leaving the blockquote empty.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read the description from a local text file, trimmed.
pub fn from_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read description file {}", path.display()))?;
    Ok(text.trim().to_string())
}

/// Fetch the description for `technique` from attack.mitre.org.
#[cfg(feature = "fetch")]
pub fn fetch_description(technique: &str) -> Option<String> {
    remote::fetch(technique)
}

/// Built without the `fetch` feature there is nothing to fetch.
#[cfg(not(feature = "fetch"))]
pub fn fetch_description(_technique: &str) -> Option<String> {
    None
}

#[cfg(feature = "fetch")]
mod remote {
    use regex::Regex;
    use std::sync::LazyLock;
    use std::time::Duration;

    const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

    // The technique page carries its summary in a container marked with one
    // of two id/class conventions, depending on the site generation.
    static RE_DESC_REGION: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r#"(?is)<div[^>]*(?:id="description"|class="[^"]*description-body[^"]*")[^>]*>(.*?)</div>"#,
        )
        .unwrap()
    });
    static RE_MAIN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<main[^>]*>(.*?)</main>").unwrap());
    static RE_PARAGRAPH: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap());
    static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

    pub fn fetch(technique: &str) -> Option<String> {
        let url = format!("https://attack.mitre.org/techniques/{technique}/");
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent("Mozilla/5.0")
            .build()
            .ok()?;
        let body = client
            .get(&url)
            .send()
            .ok()?
            .error_for_status()
            .ok()?
            .text()
            .ok()?;
        extract_description(&body)
    }

    /// Pull the technique summary out of a page body.
    ///
    /// Prefers the dedicated description container; when the page has none,
    /// falls back to the first two paragraphs of main content.
    pub(crate) fn extract_description(html: &str) -> Option<String> {
        if let Some(caps) = RE_DESC_REGION.captures(html) {
            let text = fragment_text(&caps[1], "\n");
            return if text.is_empty() { None } else { Some(text) };
        }
        let scope = match RE_MAIN.captures(html) {
            Some(caps) => caps.get(1).map_or(html, |m| m.as_str()),
            None => html,
        };
        let paragraphs: Vec<String> = RE_PARAGRAPH
            .captures_iter(scope)
            .take(2)
            .map(|caps| fragment_text(&caps[1], " "))
            .filter(|text| !text.is_empty())
            .collect();
        if paragraphs.is_empty() {
            None
        } else {
            Some(paragraphs.join("\n\n"))
        }
    }

    /// Strip tags, trim each remaining text fragment, drop empties, join.
    fn fragment_text(html: &str, separator: &str) -> String {
        let stripped = RE_TAG.replace_all(html, "\n");
        stripped
            .split('\n')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(unescape_entities)
            .collect::<Vec<_>>()
            .join(separator)
    }

    // The handful of entities that actually show up in these pages. `&amp;`
    // goes last so an already-escaped entity is not decoded twice.
    fn unescape_entities(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_file_trims_contents() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\nAdversaries may do things.\n\n").unwrap();
        let text = from_file(file.path()).unwrap();
        assert_eq!(text, "Adversaries may do things.");
    }

    #[test]
    fn from_file_missing_is_an_error() {
        let err = from_file(Path::new("/nonexistent/desc.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read description file"));
    }

    #[cfg(not(feature = "fetch"))]
    #[test]
    fn fetch_is_inert_without_the_feature() {
        assert_eq!(fetch_description("T1005"), None);
    }
}
