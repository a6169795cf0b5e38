use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const FALLBACK_BASE_NAME: &str = "video";
const MAX_BASE_NAME_CHARS: usize = 100;

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w.\-]").unwrap());

/// Turns an untrusted client-supplied filename into a safe on-disk name.
/// Total: always returns a non-empty string. Collision resistance is not a
/// goal here; the store prefixes a fresh unique token before this name.
pub fn sanitize_file_name(raw: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(raw, "_");
    let cleaned = UNSAFE_CHARS.replace_all(&collapsed, "");

    if cleaned.is_empty() {
        return FALLBACK_BASE_NAME.to_string();
    }

    let path = Path::new(cleaned.as_ref());
    let extension = path.extension().and_then(|ext| ext.to_str());
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_BASE_NAME);

    let stem: String = stem.chars().take(MAX_BASE_NAME_CHARS).collect();

    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs_to_single_underscore() {
        assert_eq!(sanitize_file_name("my  holiday   video.mp4"), "my_holiday_video.mp4");
        assert_eq!(sanitize_file_name("tab\there.mov"), "tab_here.mov");
    }

    #[test]
    fn strips_characters_outside_word_dot_hyphen() {
        assert_eq!(sanitize_file_name("cl!p@(1).mp4"), "clp1.mp4");
        assert_eq!(sanitize_file_name("a/b\\c.mov"), "abc.mov");
        assert_eq!(sanitize_file_name("semi;colon:name.avi"), "semicolonname.avi");
    }

    #[test]
    fn path_traversal_input_loses_its_separators() {
        let sanitized = sanitize_file_name("../../etc/passwd");
        assert!(!sanitized.contains('/'));
        assert!(!sanitized.contains('\\'));
        assert!(!sanitized.is_empty());
    }

    #[test]
    fn empty_or_fully_illegal_input_falls_back() {
        assert_eq!(sanitize_file_name(""), "video");
        assert_eq!(sanitize_file_name("???***"), "video");
        assert_eq!(sanitize_file_name("   "), "_");
    }

    #[test]
    fn truncates_stem_to_100_chars_preserving_extension() {
        let long = format!("{}.mp4", "a".repeat(250));
        let sanitized = sanitize_file_name(&long);
        assert_eq!(sanitized, format!("{}.mp4", "a".repeat(100)));
    }

    #[test]
    fn keeps_reasonable_names_unchanged() {
        assert_eq!(sanitize_file_name("holiday-2024_final.mp4"), "holiday-2024_final.mp4");
        assert_eq!(sanitize_file_name("noextension"), "noextension");
    }

    #[test]
    fn is_total_over_awkward_inputs() {
        for raw in ["....", ".mp4", "..mp4", "\u{0000}\u{0007}", "名前 です.mov"] {
            let sanitized = sanitize_file_name(raw);
            assert!(!sanitized.is_empty(), "{raw:?} produced an empty name");
            assert!(!sanitized.contains('/'));
        }
    }
}
