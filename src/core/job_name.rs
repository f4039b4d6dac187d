//! Job identifier and artifact name derivation
//!
//! Job names join their segments with a double underscore. Distribution and
//! profile names, OS code names, and architectures are single-word
//! identifiers without underscores, so every segment parses unambiguously
//! and distinct inputs can never collide; package names occupy a whole
//! segment of their own. Source and binary jobs get separate entry points
//! because their identifiers differ in arity, not just content.

/// Canonical name of the source package build job for a package on a
/// (os, code name) platform.
pub fn source_job_name(
    distro_name: &str,
    profile_name: &str,
    pkg_name: &str,
    os_name: &str,
    os_code_name: &str,
) -> String {
    format!("{distro_name}_{profile_name}__{pkg_name}__{os_name}_{os_code_name}__source")
}

/// Canonical name of the binary package build job for a package on a
/// (os, code name, arch) platform.
pub fn binary_job_name(
    distro_name: &str,
    profile_name: &str,
    pkg_name: &str,
    os_name: &str,
    os_code_name: &str,
    arch: &str,
) -> String {
    format!("{distro_name}_{profile_name}__{pkg_name}__{os_name}_{os_code_name}_{arch}__binary")
}

/// Name under which a package's artifacts are published in the Debian
/// repository: distribution-prefixed, lowercased, underscores folded to
/// hyphens.
pub fn debian_package_name(distro_name: &str, pkg_name: &str) -> String {
    format!("{distro_name}-{pkg_name}")
        .to_lowercase()
        .replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;

    #[test]
    fn test_source_job_name_shape() {
        assert_eq!(
            source_job_name("dusk", "default", "libfoo", "ubuntu", "noble"),
            "dusk_default__libfoo__ubuntu_noble__source"
        );
    }

    #[test]
    fn test_binary_job_name_shape() {
        assert_eq!(
            binary_job_name("dusk", "default", "libfoo", "ubuntu", "noble", "amd64"),
            "dusk_default__libfoo__ubuntu_noble_amd64__binary"
        );
    }

    #[test]
    fn test_source_and_binary_names_never_equal() {
        let source = source_job_name("dusk", "default", "libfoo", "ubuntu", "noble");
        let binary = binary_job_name("dusk", "default", "libfoo", "ubuntu", "noble", "amd64");
        assert_ne!(source, binary);
    }

    #[test]
    fn test_debian_package_name() {
        assert_eq!(
            debian_package_name("dusk", "My_Tool"),
            "dusk-my-tool"
        );
    }

    // Field values as admitted by manifest validation: no double underscore.
    fn field() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9-]{0,8}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        /// Distinct (package, platform, variant) inputs never collide on
        /// the derived identifier.
        #[test]
        fn job_names_are_injective(
            pkg_a in field(), pkg_b in field(),
            code_a in field(), code_b in field(),
            arch_a in field(), arch_b in field(),
        ) {
            let source_a = source_job_name("dusk", "default", &pkg_a, "ubuntu", &code_a);
            let source_b = source_job_name("dusk", "default", &pkg_b, "ubuntu", &code_b);
            let binary_a = binary_job_name("dusk", "default", &pkg_a, "ubuntu", &code_a, &arch_a);
            let binary_b = binary_job_name("dusk", "default", &pkg_b, "ubuntu", &code_b, &arch_b);

            // A source name never equals a binary name.
            prop_assert_ne!(&source_a, &binary_b);
            prop_assert_ne!(&source_b, &binary_a);

            if (&pkg_a, &code_a) != (&pkg_b, &code_b) {
                prop_assert_ne!(&source_a, &source_b);
            }
            if (&pkg_a, &code_a, &arch_a) != (&pkg_b, &code_b, &arch_b) {
                prop_assert_ne!(&binary_a, &binary_b);
            }
        }
    }
}
