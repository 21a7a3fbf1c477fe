//! Heading anchors and the table of contents.
//!
//! The TOC links must land on the anchors GitHub derives from the section
//! headings, so [`slug`] mirrors GitHub's scheme: lowercase, punctuation
//! dropped, one hyphen per whitespace run. Literal hyphens pass through
//! untouched, which is how `Atomic Test #1 - Install net.exe` comes out as
//! `atomic-test-1---install-netexe`.

/// Anchor slug for a heading, matching GitHub's rendering of it.
///
/// Whitespace runs become a single hyphen each; alphanumerics, underscores
/// and hyphens are kept; everything else is dropped. Hyphen runs are never
/// collapsed, so the output is stable under re-slugging.
pub fn slug(heading: &str) -> String {
    let lowered = heading.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_gap = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            pending_gap = true;
        } else if c.is_alphanumeric() || c == '_' || c == '-' {
            if pending_gap {
                out.push('-');
                pending_gap = false;
            }
            out.push(c);
        }
        // Any other character vanishes without a trace, so `net.exe`
        // merges into `netexe`.
    }
    // A run left pending at the end still counts: a name ending in
    // whitespace plus punctuation anchors with a trailing hyphen.
    if pending_gap {
        out.push('-');
    }
    out
}

/// One table-of-contents line linking to the section for `heading`.
pub fn toc_entry(heading: &str) -> String {
    format!("- [{}](#{})", heading, slug(heading))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_keeps_hyphen_runs() {
        assert_eq!(
            slug("Atomic Test #1 - Install net.exe"),
            "atomic-test-1---install-netexe"
        );
    }

    #[test]
    fn slug_lowercases() {
        assert_eq!(slug("PowerShell Session"), "powershell-session");
    }

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(slug("a  b"), "a-b");
        assert_eq!(slug("a \t b"), "a-b");
    }

    #[test]
    fn slug_drops_punctuation_silently() {
        assert_eq!(slug("net.exe (v2)!"), "netexe-v2");
    }

    #[test]
    fn slug_trailing_whitespace_run_becomes_hyphen() {
        assert_eq!(
            slug("Atomic Test #1 - Install !"),
            "atomic-test-1---install-"
        );
        assert_eq!(slug("! !"), "-");
    }

    #[test]
    fn slug_keeps_underscores() {
        assert_eq!(slug("auto_generated guid"), "auto_generated-guid");
    }

    #[test]
    fn slug_is_idempotent() {
        for input in [
            "Atomic Test #1 - Install net.exe",
            "Atomic Test #1 - Install !",
            "a - b",
            "  spaced   out  ",
            "",
        ] {
            let once = slug(input);
            assert_eq!(slug(&once), once);
        }
    }

    #[test]
    fn slug_empty_input() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("   "), "");
    }

    #[test]
    fn toc_entry_links_heading_to_anchor() {
        assert_eq!(
            toc_entry("Atomic Test #2 - Dump creds"),
            "- [Atomic Test #2 - Dump creds](#atomic-test-2---dump-creds)"
        );
    }
}
