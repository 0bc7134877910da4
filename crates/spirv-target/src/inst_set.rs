//! Extended instruction sets (`OpExtInstImport` libraries).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentFamily;
use crate::extension::Extension;

/// An externally defined library of extended instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstructionSet {
    #[serde(rename = "OpenCL.std")]
    OpenClStd,
    #[serde(rename = "GLSL.std.450")]
    GlslStd450,
    #[serde(rename = "SPV_AMD_shader_trinary_minmax")]
    SpvAmdShaderTrinaryMinmax,
}

/// Instruction sets implied by an enabled extension.
///
/// Adding a library that comes with an extension means adding one entry here.
pub const IMPLIED_EXT_INST_SETS: &[(Extension, InstructionSet)] = &[(
    Extension::SpvAmdShaderTrinaryMinmaxExtension,
    InstructionSet::SpvAmdShaderTrinaryMinmax,
)];

impl InstructionSet {
    /// Name used in `OpExtInstImport`.
    pub fn name(self) -> &'static str {
        match self {
            InstructionSet::OpenClStd => "OpenCL.std",
            InstructionSet::GlslStd450 => "GLSL.std.450",
            InstructionSet::SpvAmdShaderTrinaryMinmax => "SPV_AMD_shader_trinary_minmax",
        }
    }

    /// The instruction set every target of `environment` can use.
    pub fn default_for(environment: EnvironmentFamily) -> Self {
        match environment {
            EnvironmentFamily::OpenCl => InstructionSet::OpenClStd,
            EnvironmentFamily::Shader => InstructionSet::GlslStd450,
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
