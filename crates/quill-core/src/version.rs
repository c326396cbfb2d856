use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A release version with exactly three numeric components.
///
/// Release tags are not required to be version-shaped; anything that is not
/// three dot-separated non-negative integers is rejected rather than coerced,
/// and [`UpdateClass::between`] maps that rejection to [`UpdateClass::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("expected three dot-separated components, got {0}")]
    ComponentCount(usize),
    #[error("invalid version component: {0:?}")]
    Component(String),
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionParseError::ComponentCount(parts.len()));
        }

        let component = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| VersionParseError::Component(part.to_string()))
        };

        Ok(Self {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How far apart the installed and the latest release are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateClass {
    /// Numerically identical.
    None,
    /// Only the patch component differs.
    Patch,
    /// The major or minor component differs.
    MinorOrMajor,
    /// At least one side is not a three-component numeric version.
    Unknown,
}

impl UpdateClass {
    /// Classify the step from `current` to `latest`. Precedence is strict
    /// top-down: a major or minor difference dominates a patch difference,
    /// and equality cascades downward.
    #[must_use]
    pub fn classify(current: Version, latest: Version) -> Self {
        if current.major != latest.major || current.minor != latest.minor {
            Self::MinorOrMajor
        } else if current.patch != latest.patch {
            Self::Patch
        } else {
            Self::None
        }
    }

    /// Classify from raw tag text. Either side failing to parse yields
    /// [`UpdateClass::Unknown`]; the decision layer must not guess.
    #[must_use]
    pub fn between(current: &str, latest: &str) -> Self {
        match (current.parse::<Version>(), latest.parse::<Version>()) {
            (Ok(current), Ok(latest)) => Self::classify(current, latest),
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UpdateClass, Version, VersionParseError};

    fn version(major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch,
        }
    }

    #[test]
    fn parses_three_numeric_components() {
        assert_eq!(
            "1.2.3".parse::<Version>().expect("1.2.3 should parse"),
            version(1, 2, 3)
        );
        assert_eq!(
            "0.0.0".parse::<Version>().expect("0.0.0 should parse"),
            version(0, 0, 0)
        );
    }

    #[test]
    fn rejects_wrong_component_counts() {
        assert_eq!(
            "1.2".parse::<Version>(),
            Err(VersionParseError::ComponentCount(2))
        );
        assert_eq!(
            "1.2.3.4".parse::<Version>(),
            Err(VersionParseError::ComponentCount(4))
        );
        assert_eq!(
            "".parse::<Version>(),
            Err(VersionParseError::ComponentCount(1))
        );
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert_eq!(
            "1.2.a".parse::<Version>(),
            Err(VersionParseError::Component("a".to_string()))
        );
        assert_eq!(
            "1.2.3-beta".parse::<Version>(),
            Err(VersionParseError::Component("3-beta".to_string()))
        );
        assert_eq!(
            "-1.2.3".parse::<Version>(),
            Err(VersionParseError::Component("-1".to_string()))
        );
    }

    #[test]
    fn classifies_with_top_down_precedence() {
        assert_eq!(
            UpdateClass::classify(version(1, 2, 3), version(1, 2, 3)),
            UpdateClass::None
        );
        assert_eq!(
            UpdateClass::classify(version(1, 2, 3), version(1, 2, 4)),
            UpdateClass::Patch
        );
        assert_eq!(
            UpdateClass::classify(version(1, 2, 3), version(1, 3, 0)),
            UpdateClass::MinorOrMajor
        );
        assert_eq!(
            UpdateClass::classify(version(1, 2, 3), version(2, 0, 0)),
            UpdateClass::MinorOrMajor
        );
        // A major difference dominates even when minor and patch agree.
        assert_eq!(
            UpdateClass::classify(version(2, 2, 3), version(1, 2, 3)),
            UpdateClass::MinorOrMajor
        );
    }

    #[test]
    fn between_maps_parse_failures_to_unknown() {
        assert_eq!(UpdateClass::between("1.2.3", "nightly"), UpdateClass::Unknown);
        assert_eq!(UpdateClass::between("", "1.2.3"), UpdateClass::Unknown);
        assert_eq!(
            UpdateClass::between("1.2.3", "1.2.4"),
            UpdateClass::Patch
        );
    }

    #[test]
    fn between_treats_leading_zeros_as_numeric_equality() {
        assert_eq!(UpdateClass::between("1.02.3", "1.2.3"), UpdateClass::None);
    }
}
