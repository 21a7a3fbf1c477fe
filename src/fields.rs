//! Field-level mappers: the two escaping policies and the executor,
//! platform and elevation formatters.
//!
//! Inline contexts (headings, code fences, free text) get values verbatim
//! apart from trimming, so commands keep their quotes and backslashes.
//! Table cells additionally get HTML entities and backslash armor, since a
//! raw backslash or angle bracket inside a `| cell |` breaks the row.

/// Inline policy: trim, otherwise pass through untouched.
pub fn escape_inline(value: Option<&str>) -> String {
    match value {
        Some(s) => s.trim().to_string(),
        None => String::new(),
    }
}

/// Table-cell policy: HTML-entity escape, then neutralize backslashes.
///
/// The entity passes run first; running the backslash pass earlier would
/// double-escape the `&` inside `&#92;`.
pub fn escape_table(value: Option<&str>) -> String {
    let Some(s) = value else {
        return String::new();
    };
    s.trim()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('\\', "&#92;")
}

/// Fenced-code-block language tag for an executor name.
pub fn code_fence_lang(executor_name: Option<&str>) -> &'static str {
    let name = executor_name.unwrap_or("").trim().to_lowercase();
    match name.as_str() {
        "command_prompt" | "cmd" => "cmd",
        "powershell" | "pwsh" => "powershell",
        "bash" => "bash",
        "sh" => "sh",
        _ => "text",
    }
}

/// Comma-join platform tags for display: `windows` reads `Windows`,
/// `macos` reads `macOS`.
pub fn format_platforms(platforms: &[String]) -> String {
    platforms
        .iter()
        .map(|p| platform_display(p))
        .collect::<Vec<_>>()
        .join(", ")
}

fn platform_display(tag: &str) -> String {
    let tag = tag.trim();
    if tag.eq_ignore_ascii_case("macos") {
        return "macOS".to_string();
    }
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Warning appended to the commands heading when the test needs elevation.
/// Anything but an explicit `true` stays silent.
pub fn elevation_suffix(elevation_required: Option<bool>) -> &'static str {
    match elevation_required {
        Some(true) => "  Elevation Required (e.g. root or admin) ",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_absent_is_empty() {
        assert_eq!(escape_inline(None), "");
    }

    #[test]
    fn inline_trims_only() {
        assert_eq!(escape_inline(Some("  net user /add  \n")), "net user /add");
        assert_eq!(escape_inline(Some(r#"echo "a\b" & dir"#)), r#"echo "a\b" & dir"#);
    }

    #[test]
    fn table_escapes_each_character_once() {
        assert_eq!(escape_table(Some(r"\&")), "&#92;&amp;");
        assert_eq!(escape_table(Some(r"C:\Temp\out")), "C:&#92;Temp&#92;out");
        assert_eq!(escape_table(Some(r#"<a href="x">'y'</a>"#)), "&lt;a href=&quot;x&quot;&gt;&#x27;y&#x27;&lt;/a&gt;");
    }

    #[test]
    fn table_absent_is_empty() {
        assert_eq!(escape_table(None), "");
        assert_eq!(escape_table(Some("   ")), "");
    }

    #[test]
    fn fence_lang_known_executors() {
        assert_eq!(code_fence_lang(Some("command_prompt")), "cmd");
        assert_eq!(code_fence_lang(Some("cmd")), "cmd");
        assert_eq!(code_fence_lang(Some("PowerShell")), "powershell");
        assert_eq!(code_fence_lang(Some("pwsh")), "powershell");
        assert_eq!(code_fence_lang(Some(" bash ")), "bash");
        assert_eq!(code_fence_lang(Some("sh")), "sh");
    }

    #[test]
    fn fence_lang_falls_back_to_text() {
        assert_eq!(code_fence_lang(None), "text");
        assert_eq!(code_fence_lang(Some("")), "text");
        assert_eq!(code_fence_lang(Some("manual")), "text");
    }

    #[test]
    fn platforms_display_forms() {
        let tags = ["windows", "macos", "linux"].map(String::from);
        assert_eq!(format_platforms(&tags), "Windows, macOS, Linux");
        assert_eq!(format_platforms(&[]), "");
        assert_eq!(format_platforms(&["MACOS".to_string()]), "macOS");
    }

    #[test]
    fn elevation_only_on_true() {
        assert_eq!(
            elevation_suffix(Some(true)),
            "  Elevation Required (e.g. root or admin) "
        );
        assert_eq!(elevation_suffix(Some(false)), "");
        assert_eq!(elevation_suffix(None), "");
    }
}
