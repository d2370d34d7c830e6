use crate::error::ParseError;
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Numeric components are parsed leniently with respect to leading zeros
/// (`01.2.3` is `1.2.3`) but strictly otherwise: no whitespace, no signs,
/// no empty components. Pre-release and build metadata are validated by the
/// `semver` crate's identifier rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl Version {
    /// Create a new release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Parse `<uint>.<uint>.<uint>[-<prerelease>][+<build>]`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(ParseError::Format {
                input: text.to_string(),
            });
        }

        let major = parse_component(text, "major", parts[0])?;
        let minor = parse_component(text, "minor", parts[1])?;
        let patch = parse_component(text, "patch", parts[2])?;

        let pre = match pre {
            Some(value) => {
                if value.is_empty() {
                    return Err(ParseError::Prerelease {
                        input: text.to_string(),
                        value: value.to_string(),
                        reason: "empty pre-release".to_string(),
                    });
                }
                Prerelease::new(value).map_err(|e| ParseError::Prerelease {
                    input: text.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })?
            }
            None => Prerelease::EMPTY,
        };

        let build = match build {
            Some(value) => {
                if value.is_empty() {
                    return Err(ParseError::Build {
                        input: text.to_string(),
                        value: value.to_string(),
                        reason: "empty build metadata".to_string(),
                    });
                }
                BuildMetadata::new(value).map_err(|e| ParseError::Build {
                    input: text.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })?
            }
            None => BuildMetadata::EMPTY,
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre,
            build,
        })
    }

    /// True when the version carries a pre-release label
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// The bare `major.minor.patch` triplet
    pub fn core(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Compute the next version for a bump kind.
    ///
    /// Numeric bumps produce a plain release (pre-release and build metadata
    /// are dropped). `Explicit` returns the supplied version unchanged and is
    /// not checked against `self`.
    pub fn bump(&self, kind: &BumpKind) -> Version {
        match kind {
            BumpKind::Major => Version::new(self.major + 1, 0, 0),
            BumpKind::Minor => Version::new(self.major, self.minor + 1, 0),
            BumpKind::Patch => Version::new(self.major, self.minor, self.patch + 1),
            BumpKind::Explicit(target) => target.clone(),
        }
    }
}

fn parse_component(input: &str, component: &'static str, value: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::Component {
        input: input.to_string(),
        component,
        value: value.to_string(),
    };

    // u64::from_str accepts a leading '+', so digits are checked first
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Requested version bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    /// Replace the whole version, used for manual corrections
    Explicit(Version),
}

impl BumpKind {
    pub fn is_explicit(&self) -> bool {
        matches!(self, BumpKind::Explicit(_))
    }
}

impl FromStr for BumpKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Version::parse(other).map(BumpKind::Explicit),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
            BumpKind::Explicit(v) => write!(f, "{}", v),
        }
    }
}
