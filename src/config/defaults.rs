//! Default configuration values

/// The only OS family the buildfarm currently provisions agents for.
/// Other OS names in a build profile are ignored.
pub const SUPPORTED_OS_NAME: &str = "ubuntu";

/// Architectures the buildfarm has binary build agents for.
pub const ALLOWED_ARCHES: &[&str] = &["amd64"];

/// Pseudo-architecture marking a source package build.
pub const SOURCE_ARCH: &str = "source";

/// Cache TTL for fetched repository index files (in seconds)
pub const REPO_INDEX_CACHE_TTL: u64 = 3600; // 1 hour

/// HTTP request timeout (in seconds)
pub const HTTP_TIMEOUT: u64 = 60;

/// HTTP connect timeout (in seconds)
pub const HTTP_CONNECT_TIMEOUT: u64 = 30;

/// Case count for property-based tests
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
