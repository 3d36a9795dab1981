//! Filename handling for uploads.
//!
//! Names are NFKD-normalized first so accented letters keep their base
//! character (`tài liệu.txt` is stored as `tai_lieu.txt`). Path separators
//! become word breaks, runs of whitespace collapse to a
//! single `_`, and anything outside `[A-Za-z0-9._-]` is dropped, so
//! `../../etc/passwd.txt` is stored as `etc_passwd.txt`.

use unicode_normalization::UnicodeNormalization;

/// Names that open devices instead of files on Windows.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "AUX", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3", "PRN", "NUL",
];

/// Reduce a user-supplied filename to a single safe path component.
///
/// May return an empty string when nothing survives.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default();
    if !trimmed.is_empty() && WINDOWS_DEVICE_NAMES.contains(&stem.to_ascii_uppercase().as_str()) {
        return format!("_{trimmed}");
    }
    trimmed.to_string()
}

/// The substring after the last `.`, if the name has one.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Split into stem and extension (with its dot). A leading dot does not
/// start an extension: `.profile` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}
