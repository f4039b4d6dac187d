//! Well-known locations

/// Default release index location
pub const RELEASE_INDEX: &str =
    "https://raw.githubusercontent.com/farmgate-project/farmgate-index/main/index.toml";
