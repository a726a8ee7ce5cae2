//! Verse segmentation of stored lyric text
//!
//! Stored lyrics may carry literal `\n` escape sequences instead of real line
//! breaks. Every non-blank physical line becomes one verse.

/// Two-character escape sequence some lyric sources store instead of a line break
const ESCAPED_NEWLINE: &str = "\\n";

/// Split raw lyric text into trimmed, non-empty verse lines
///
/// # Examples
/// ```
/// use musiclib_api::verses::segment;
///
/// assert_eq!(segment("Line one\n\nLine two  \n"), vec!["Line one", "Line two"]);
/// assert_eq!(segment("Verse\\nChorus"), vec!["Verse", "Chorus"]);
/// assert!(segment("  \\n \n").is_empty());
/// ```
pub fn segment(raw: &str) -> Vec<String> {
    raw.replace(ESCAPED_NEWLINE, "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
