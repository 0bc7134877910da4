//! Versions of the SPIR-V format and of the OpenCL environment.
//!
//! Versions are `major.minor` pairs, ordered by their compact encoding
//! `major * 10 + minor` (1.4 encodes as 14). A version that was never
//! requested is [`Version::Unspecified`], which satisfies every minimum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A requested or resolved version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Version {
    #[default]
    Unspecified,
    Specified(Release),
}

/// A concrete `major.minor` release. `major` is non-zero and `minor` is a
/// single digit, so the encoding is never 0 and never collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Release {
    major: u8,
    minor: u8,
}

impl Release {
    pub const fn major(self) -> u8 {
        self.major
    }

    pub const fn minor(self) -> u8 {
        self.minor
    }
}

/// Newest SPIR-V version assumed when none is requested.
pub const LATEST_SPIRV_VERSION: Version = Version::new(1, 4);

/// Newest OpenCL version assumed when none is requested.
pub const LATEST_OPENCL_VERSION: Version = Version::new(2, 2);

/// First SPIR-V version with `OpPtrEqual` and `OpPtrNotEqual`.
pub const POINTER_COMPARISON_MIN_SPIRV: Version = Version::new(1, 4);

impl Version {
    /// A specified version.
    ///
    /// # Panics
    ///
    /// Panics if `major` is 0 or `minor` is above 9. Use [`Version::checked`]
    /// for untrusted input.
    pub const fn new(major: u8, minor: u8) -> Self {
        match Self::checked(major, minor) {
            Some(version) => version,
            None => panic!("invalid version: major must be non-zero and minor a single digit"),
        }
    }

    /// A specified version, or `None` if `major` is 0 or `minor` is above 9.
    pub const fn checked(major: u8, minor: u8) -> Option<Self> {
        if major == 0 || minor > 9 {
            None
        } else {
            Some(Version::Specified(Release { major, minor }))
        }
    }

    /// Decode `major * 10 + minor`. Zero decodes to `Unspecified`; values
    /// whose major part is 0 or does not fit in a `u8` are rejected.
    pub const fn from_encoded(encoded: u32) -> Option<Self> {
        if encoded == 0 {
            return Some(Version::Unspecified);
        }
        let major = encoded / 10;
        if major > u8::MAX as u32 {
            return None;
        }
        Self::checked(major as u8, (encoded % 10) as u8)
    }

    /// Compact encoding; `Unspecified` encodes as 0.
    pub const fn encoded(self) -> u32 {
        match self {
            Version::Unspecified => 0,
            Version::Specified(release) => release.major as u32 * 10 + release.minor as u32,
        }
    }

    pub const fn is_specified(self) -> bool {
        matches!(self, Version::Specified(_))
    }

    /// Whether this version meets `min`.
    ///
    /// `Unspecified` meets every minimum. Resolved subtargets never hold an
    /// unspecified version, but the rule applies to every version field.
    pub fn satisfies(self, min: Version) -> bool {
        match self {
            Version::Unspecified => true,
            Version::Specified(_) => self.encoded() >= min.encoded(),
        }
    }

    /// Replace `Unspecified` with `default`.
    pub fn or(self, default: Version) -> Version {
        match self {
            Version::Unspecified => default,
            specified => specified,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Unspecified => f.write_str("unspecified"),
            Version::Specified(release) => write!(f, "{}.{}", release.major, release.minor),
        }
    }
}

impl FromStr for Version {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TargetError::InvalidVersion {
            value: s.to_string(),
        };

        if s == "unspecified" {
            return Ok(Version::Unspecified);
        }
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let major: u8 = major.parse().map_err(|_| invalid())?;
        let minor: u8 = minor.parse().map_err(|_| invalid())?;
        Version::checked(major, minor).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Version {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
