//! Environment model.
//!
//! SPIR-V modules are consumed by one of two mutually exclusive execution
//! environments. The family is fixed once per target and gates both OpenCL
//! version queries and extension availability.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::triple::{Arch, Triple};

/// The execution environment family of a SPIR-V target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentFamily {
    /// Graphics/compute shaders (Vulkan). Default instruction set is
    /// `GLSL.std.450`.
    Shader,
    /// OpenCL kernels. Default instruction set is `OpenCL.std`.
    #[serde(rename = "opencl")]
    OpenCl,
}

impl EnvironmentFamily {
    /// Select the family from a triple.
    ///
    /// Vulkan OSes (`vulkan`, `vulkan1.3`, ...) and logical `spirv`, which
    /// only shaders use, select `Shader`. Everything else, including the
    /// common `spirv64-unknown-unknown`, selects `OpenCl`.
    pub fn from_triple(triple: &Triple) -> Self {
        if triple.is_os_vulkan() || triple.arch == Arch::Spirv {
            EnvironmentFamily::Shader
        } else {
            EnvironmentFamily::OpenCl
        }
    }
}

impl fmt::Display for EnvironmentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentFamily::Shader => f.write_str("shader"),
            EnvironmentFamily::OpenCl => f.write_str("opencl"),
        }
    }
}

/// A validated SPIR-V target: its triple plus the environment family
/// derived from it.
///
/// Serializes as its triple; deserializing re-runs the validation of
/// [`TargetProfile::from_triple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Triple", into = "Triple")]
pub struct TargetProfile {
    triple: Triple,
    environment: EnvironmentFamily,
}

impl TargetProfile {
    /// Validate that `triple` belongs to the SPIR-V family and derive its
    /// environment.
    pub fn from_triple(triple: Triple) -> Result<Self> {
        if !triple.is_spirv() {
            return Err(TargetError::NotSpirv {
                triple: triple.to_string(),
            });
        }
        let environment = EnvironmentFamily::from_triple(&triple);
        Ok(Self {
            triple,
            environment,
        })
    }

    /// Parse and validate a triple string.
    pub fn parse(triple: &str) -> Result<Self> {
        Self::from_triple(Triple::parse(triple)?)
    }

    pub fn triple(&self) -> &Triple {
        &self.triple
    }

    pub fn environment(&self) -> EnvironmentFamily {
        self.environment
    }

    pub fn is_opencl_env(&self) -> bool {
        self.environment == EnvironmentFamily::OpenCl
    }
}

impl TryFrom<Triple> for TargetProfile {
    type Error = TargetError;

    fn try_from(triple: Triple) -> Result<Self> {
        Self::from_triple(triple)
    }
}

impl From<TargetProfile> for Triple {
    fn from(profile: TargetProfile) -> Self {
        profile.triple
    }
}
