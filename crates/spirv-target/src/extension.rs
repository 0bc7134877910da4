//! Optional SPIR-V extensions a subtarget may enable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A SPIR-V extension known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Extension {
    SpvIntelArbitraryPrecisionIntegers,
    SpvIntelOptnone,
    SpvKhrNoIntegerWrapDecoration,
    SpvAmdShaderTrinaryMinmaxExtension,
}

impl Extension {
    /// Every known extension, in declaration order.
    pub const ALL: [Extension; 4] = [
        Extension::SpvIntelArbitraryPrecisionIntegers,
        Extension::SpvIntelOptnone,
        Extension::SpvKhrNoIntegerWrapDecoration,
        Extension::SpvAmdShaderTrinaryMinmaxExtension,
    ];

    /// The extension name as spelled in SPIR-V modules and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Extension::SpvIntelArbitraryPrecisionIntegers => {
                "SPV_INTEL_arbitrary_precision_integers"
            }
            Extension::SpvIntelOptnone => "SPV_INTEL_optnone",
            Extension::SpvKhrNoIntegerWrapDecoration => "SPV_KHR_no_integer_wrap_decoration",
            Extension::SpvAmdShaderTrinaryMinmaxExtension => {
                "SPV_AMD_shader_trinary_minmax_extension"
            }
        }
    }

    /// One-line description for help output.
    pub fn description(self) -> &'static str {
        match self {
            Extension::SpvIntelArbitraryPrecisionIntegers => {
                "Allows generating arbitrary width integer types"
            }
            Extension::SpvIntelOptnone => {
                "Adds OptNoneINTEL value for Function Control mask that indicates a request to not optimize the function"
            }
            Extension::SpvKhrNoIntegerWrapDecoration => {
                "Adds decorations to indicate that a given instruction does not cause integer wrapping"
            }
            Extension::SpvAmdShaderTrinaryMinmaxExtension => {
                "Enables the SPV_AMD_shader_trinary_minmax extended instruction set"
            }
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extension {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extension::ALL
            .into_iter()
            .find(|ext| ext.name() == s)
            .ok_or_else(|| TargetError::UnknownExtension {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for Extension {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Extension> for String {
    fn from(ext: Extension) -> Self {
        ext.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for ext in Extension::ALL {
            assert_eq!(ext.name().parse::<Extension>().unwrap(), ext);
            assert!(!ext.description().is_empty());
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "SPV_KHR_not_a_thing".parse::<Extension>().unwrap_err();
        assert!(matches!(err, TargetError::UnknownExtension { ref name } if name == "SPV_KHR_not_a_thing"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("spv_intel_optnone".parse::<Extension>().is_err());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Extension::SpvIntelOptnone.to_string(), "SPV_INTEL_optnone");
    }
}
