//! Debian version suffix handling
//!
//! Published package versions carry a distribution-specific suffix after
//! the packaging revision (the code-name marker and rebuild timestamp,
//! e.g. `1.2.3-1noble` or `1.2.3-0jammy.20240115`). Staleness comparison
//! strips that suffix before testing equality against the release version
//! from the manifest, which ends at the numeric revision (`1.2.3-1`).

use regex::Regex;

/// Strip the distribution-specific suffix from a published version string,
/// keeping the dotted-numeric upstream version and the numeric packaging
/// revision. A version that does not start with a digit is returned
/// unchanged.
pub fn strip_version_suffix(version: &str) -> &str {
    let re = Regex::new(r"^[0-9]+(\.[0-9]+)*(-[0-9]+)?").expect("static pattern is valid");
    match re.find(version) {
        Some(m) => &version[..m.end()],
        None => version,
    }
}

/// Whether a published version matches the release version once its
/// suffix is stripped. Older, newer, or malformed published versions all
/// count as stale.
pub fn is_up_to_date(published: &str, release_version: &str) -> bool {
    strip_version_suffix(published) == release_version
}
