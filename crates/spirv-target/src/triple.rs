//! Target triple model.
//!
//! A triple has the shape `arch[-vendor[-os[-environment]]]`, e.g.
//! `spirv64-unknown-opencl` or `spirv-unknown-vulkan1.3`. Only the
//! architecture and OS components matter to capability resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// Architecture component of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arch {
    /// Logical SPIR-V: objects are addressed by ID, there is no native pointer.
    Spirv,
    /// Physical SPIR-V with 32-bit pointers.
    Spirv32,
    /// Physical SPIR-V with 64-bit pointers.
    Spirv64,
    /// Any architecture outside the SPIR-V family.
    Other(String),
}

impl Arch {
    /// Map an architecture component to an [`Arch`].
    pub fn from_component(component: &str) -> Self {
        match component {
            "spirv" => Arch::Spirv,
            "spirv32" => Arch::Spirv32,
            "spirv64" => Arch::Spirv64,
            other => Arch::Other(other.to_string()),
        }
    }

    /// The canonical triple spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Arch::Spirv => "spirv",
            Arch::Spirv32 => "spirv32",
            Arch::Spirv64 => "spirv64",
            Arch::Other(name) => name,
        }
    }

    pub fn is_spirv(&self) -> bool {
        !matches!(self, Arch::Other(_))
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed target triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub arch: Arch,
    pub vendor: String,
    pub os: String,
    /// Trailing environment component; empty when absent.
    pub environment: String,
}

impl Triple {
    /// Parse a triple string. Missing vendor and OS components default to
    /// `unknown`.
    pub fn parse(triple: &str) -> Result<Self> {
        let trimmed = triple.trim();
        if trimmed.is_empty() {
            return Err(TargetError::InvalidTriple {
                triple: triple.to_string(),
                detail: "triple is empty".into(),
            });
        }

        let mut parts = trimmed.splitn(4, '-');
        let arch = parts.next().unwrap_or_default();
        if arch.is_empty() {
            return Err(TargetError::InvalidTriple {
                triple: triple.to_string(),
                detail: "missing architecture component".into(),
            });
        }

        let component = |part: Option<&str>| match part {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => "unknown".to_string(),
        };

        Ok(Self {
            arch: Arch::from_component(arch),
            vendor: component(parts.next()),
            os: component(parts.next()),
            environment: parts.next().unwrap_or_default().to_string(),
        })
    }

    /// Whether the triple belongs to the SPIR-V target family.
    pub fn is_spirv(&self) -> bool {
        self.arch.is_spirv()
    }

    /// Whether the OS component names Vulkan, with or without a version
    /// suffix (`vulkan`, `vulkan1.3`).
    pub fn is_os_vulkan(&self) -> bool {
        self.os.starts_with("vulkan")
    }
}

impl FromStr for Triple {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        Triple::parse(s)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.vendor, self.os)?;
        if !self.environment.is_empty() {
            write!(f, "-{}", self.environment)?;
        }
        Ok(())
    }
}

/// Pointer width in bits for a SPIR-V triple.
///
/// Logical SPIR-V has no pointer size; 32 is used there as the width of
/// ID-sized handles.
///
/// # Panics
///
/// Panics if the triple is not a SPIR-V triple. Callers validate the target
/// family first (see [`crate::TargetProfile::from_triple`]).
pub fn compute_pointer_size(triple: &Triple) -> u32 {
    assert!(
        triple.is_spirv(),
        "pointer size requested for non-SPIR-V triple '{triple}'"
    );

    match triple.arch {
        Arch::Spirv64 => 64,
        _ => 32,
    }
}
