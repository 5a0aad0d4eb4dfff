// src/fingerprint/naming.rs

/// Build the fingerprinted filename for an asset.
///
/// The filename is split exactly once at its **last** `.`: everything before
/// it is the stem, everything after it is the extension. A name with no `.`
/// has an empty extension; a leading-dot name like `.gitignore` splits into
/// an empty stem and the extension `gitignore`.
///
/// Output is `<stem>.<digest>.<ext>`. When the extension is empty the output
/// is `<stem>.<digest>` -- an empty extension never produces a trailing dot.
pub fn fingerprinted_name(filename: &str, digest: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => format!("{stem}.{digest}.{ext}"),
        Some((stem, _)) => format!("{stem}.{digest}"),
        None => format!("{filename}.{digest}"),
    }
}
