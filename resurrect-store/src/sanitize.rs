/// Map an arbitrary name to a filesystem-safe, non-empty filename stem.
///
/// Total and idempotent by construction: every step either removes
/// characters that are illegal everywhere the function might already
/// have put them, or trims trailing characters that a prior pass would
/// also have trimmed, so a second application is always a no-op.
///
/// Consecutive underscores produced by this process are *not* collapsed
/// — existing saved files on disk depend on the exact names this
/// produces, and collapsing them later would silently rename files out
/// from under a user's saved session.
pub fn sanitize_filename(input: Option<&str>) -> String {
    let raw = match input {
        Some(s) => s,
        None => return "_unnamed_".to_string(),
    };

    let mut out = raw.replace(['/', '\\'], "+");
    out = out.replace("..", "_");
    out = out.replace(['<', '>', ':', '"', '|', '?', '*'], "_");
    out = out
        .chars()
        .map(|c| {
            if (c as u32) <= 0x1f || (c as u32) == 0x7f {
                '_'
            } else {
                c
            }
        })
        .collect();
    out = out.trim_end_matches(['.', ' ']).to_string();

    if out.is_empty() {
        "_unnamed_".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashes_become_plus() {
        assert_eq!(sanitize_filename(Some("C:\\Users\\foo")), "C_+Users+foo");
    }

    #[test]
    fn path_traversal_is_neutralized() {
        let result = sanitize_filename(Some("../../../etc"));
        assert!(!result.contains(".."));
    }

    #[test]
    fn nil_empty_and_whitespace_all_fall_back() {
        assert_eq!(sanitize_filename(None), "_unnamed_");
        assert_eq!(sanitize_filename(Some("")), "_unnamed_");
        assert_eq!(sanitize_filename(Some("   ")), "_unnamed_");
    }

    #[test]
    fn is_idempotent() {
        for s in ["../../../etc", "C:\\Users\\foo", "normal-name", "  trailing.  ", "\u{7}control"] {
            let once = sanitize_filename(Some(s));
            let twice = sanitize_filename(Some(&once));
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn is_total_and_matches_the_safe_charset() {
        let forbidden = ['/', '\\', '<', '>', ':', '"', '|', '?', '*'];
        for s in ["a/b\\c", "weird:\"name\"|here?*", "trailing...", "", "   ", "tab\ttitle"] {
            let result = sanitize_filename(Some(s));
            assert!(!result.is_empty());
            assert!(!result.chars().any(|c| forbidden.contains(&c) || (c as u32) <= 0x1f || (c as u32) == 0x7f));
            assert!(!result.ends_with('.') && !result.ends_with(' '));
        }
    }

    #[test]
    fn ordinary_names_pass_through_unchanged() {
        assert_eq!(sanitize_filename(Some("my-project")), "my-project");
    }
}
