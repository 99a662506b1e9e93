use crate::error::{ReflexError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Dotted version identifier such as `1.2.3` or `release-1.2.3`
///
/// Only the part after the last hyphen is significant; any prefix is dropped
/// during parsing. The digits are kept as written so branch and tag names
/// match the operator's input (`1.02.0` stays `1.02.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub segments: Vec<u64>,
    text: String,
}

impl Version {
    /// Create a version from its numeric segments
    pub fn new(segments: Vec<u64>) -> Self {
        let text = segments
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Version { segments, text }
    }

    /// Parse version from a tag or branch suffix (e.g., "release-1.2.3" -> [1, 2, 3])
    pub fn parse(input: &str) -> Result<Self> {
        let numeric = strip_prefix(input);
        if numeric.is_empty() {
            return Err(ReflexError::malformed(input, "no version number found"));
        }

        let segments = numeric
            .split('.')
            .map(|segment| {
                segment.parse::<u64>().map_err(|_| {
                    ReflexError::malformed(
                        input,
                        format!("segment '{}' is not a non-negative integer", segment),
                    )
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Version {
            segments,
            text: numeric.to_string(),
        })
    }

    /// Decide whether moving from `from` to `self` is an upgrade.
    ///
    /// Segments are paired positionally and pairing stops at the shorter
    /// version, so `1.0` -> `1.0.5` compares `1.0` against `1.0` and is not
    /// an upgrade.
    pub fn is_upgrade_from(&self, from: &Version) -> bool {
        for (to_segment, from_segment) in self.segments.iter().zip(&from.segments) {
            match to_segment.cmp(from_segment) {
                Ordering::Less => return false,
                Ordering::Greater => return true,
                Ordering::Equal => continue,
            }
        }
        false
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Drop everything up to and including the last hyphen
fn strip_prefix(input: &str) -> &str {
    match input.rfind('-') {
        Some(idx) => &input[idx + 1..],
        None => input,
    }
}

/// Validate that `to` is a valid upgrade from `from`.
///
/// # Returns
/// * `Ok(())` - `to` is strictly greater at the first differing segment
/// * `Err(ReflexError::InvalidUpgradePath)` - equal or lower, carrying both inputs
/// * `Err(ReflexError::MalformedVersion)` - either input has a non-numeric segment
///
/// # Example
/// ```
/// use reflex::validate_upgrade;
///
/// assert!(validate_upgrade("release-1.0.0", "1.0.1").is_ok());
/// assert!(validate_upgrade("2.0.0", "1.13.1").is_err());
/// ```
pub fn validate_upgrade(from: &str, to: &str) -> Result<()> {
    let from_version = Version::parse(from)?;
    let to_version = Version::parse(to)?;

    if to_version.is_upgrade_from(&from_version) {
        Ok(())
    } else {
        Err(ReflexError::upgrade(from, to))
    }
}
