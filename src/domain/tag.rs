use crate::domain::version::Version;

/// `git describe --match` pattern selecting release tags
pub const RELEASE_TAG_PATTERN: &str = "release-*";

/// Permanent annotated tag marking a shipped release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    version: String,
}

impl ReleaseTag {
    /// Release tag for a version (e.g., 1.2.3 -> "release-1.2.3")
    pub fn for_version(version: &Version) -> Self {
        ReleaseTag {
            name: format!("release-{}", version),
            version: version.to_string(),
        }
    }

    /// Annotation message stored on the tag
    pub fn message(&self) -> String {
        format!("Release tag for {}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_tag_new() {
        let tag = ReleaseTag::for_version(&Version::new(vec![1, 2, 3]));
        assert_eq!(tag.name, "release-1.2.3");
        assert_eq!(tag.message(), "Release tag for 1.2.3");
    }

    #[test]
    fn test_release_tag_from_prefixed_input() {
        let tag = ReleaseTag::for_version(&Version::parse("release-2.0.0").unwrap());
        assert_eq!(tag.name, "release-2.0.0");
    }
}
