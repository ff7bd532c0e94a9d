//! Filename sanitizing for user- and LMS-supplied names.

/// Reduce a filename to a safe, flat name inside the image directory.
///
/// Path separators become word breaks, whitespace runs become `_`, every
/// character outside `[A-Za-z0-9._-]` is dropped, and leading or trailing
/// dots and underscores are stripped. Returns `None` when nothing is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
