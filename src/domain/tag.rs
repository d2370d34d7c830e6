use crate::domain::Version;
use crate::error::{Error, Result};

pub const DEFAULT_TAG_PATTERN: &str = "v{version}";

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a tag pattern, rejecting patterns without a `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(PLACEHOLDER) {
            return Err(Error::config(format!(
                "tag pattern '{}' must contain {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: DEFAULT_TAG_PATTERN.to_string(),
        }
    }
}

/// Check a caller-supplied tag name against git's ref-name rules.
///
/// Only the rules a user is likely to trip over are enforced here; git
/// itself remains the final authority when the tag is created.
pub fn validate_tag_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("tag name is empty")
    } else if name.starts_with('-') {
        Some("tag name cannot start with '-'")
    } else if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
        Some("tag name has an empty path component")
    } else if name.ends_with('.') || name.ends_with(".lock") {
        Some("tag name cannot end with '.' or '.lock'")
    } else if name.contains("..") || name.contains("@{") || name == "@" {
        Some("tag name contains a forbidden sequence")
    } else if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "~^:?*[\\".contains(c))
    {
        Some("tag name contains a forbidden character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::config(format!("invalid tag name '{}': {}", name, reason))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_prefix() {
        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "release-1.2.3");
    }

    #[test]
    fn test_pattern_format_keeps_prerelease() {
        let pattern = TagPattern::default();
        let version = Version::parse("2.0.0-rc.1").unwrap();
        assert_eq!(pattern.format(&version), "v2.0.0-rc.1");
    }

    #[test]
    fn test_pattern_requires_placeholder() {
        assert!(TagPattern::new("release").is_err());
    }

    #[test]
    fn test_validate_tag_name() {
        assert!(validate_tag_name("v1.2.3").is_ok());
        assert!(validate_tag_name("release-1.0.0").is_ok());
        assert!(validate_tag_name("releases/1.0.0").is_ok());

        for bad in ["", "-v1", "a b", "v1..2", "v1.lock", "v1.", "a~1", "x:y", "/v1", "a//b"] {
            assert!(validate_tag_name(bad).is_err(), "'{}' should be rejected", bad);
        }
    }
}
