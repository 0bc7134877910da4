//! Extension configuration and `.target.toml` target descriptions.
//!
//! The requested extension list is an explicit value handed to each
//! [`SubtargetBuilder`](crate::SubtargetBuilder), so independent targets in
//! one process never share it. Extension names are validated here; the
//! resolver only ever sees known extensions.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::TargetProfile;
use crate::error::{Result, TargetError};
use crate::extension::Extension;

/// The set of extensions requested for a target. Order is irrelevant and
/// duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionConfig {
    extensions: BTreeSet<Extension>,
}

impl ExtensionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and collect extension names.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = names
            .into_iter()
            .map(|name| name.as_ref().trim().parse::<Extension>())
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self { extensions })
    }

    /// Parse a comma-separated option value such as
    /// `SPV_INTEL_optnone,SPV_KHR_no_integer_wrap_decoration`.
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::from_names(list.split(',').filter(|name| !name.trim().is_empty()))
    }

    pub fn contains(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    pub fn iter(&self) -> impl Iterator<Item = Extension> + '_ {
        self.extensions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl FromIterator<Extension> for ExtensionConfig {
    fn from_iter<T: IntoIterator<Item = Extension>>(iter: T) -> Self {
        Self {
            extensions: iter.into_iter().collect(),
        }
    }
}

/// A target description as stored in a `.target.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetConfig {
    /// Target triple, e.g. `spirv64-unknown-opencl`.
    pub triple: String,
    /// Base processor name.
    #[serde(default)]
    pub cpu: String,
    /// Feature string, e.g. `+spirv1.3`.
    #[serde(default)]
    pub features: String,
    /// Requested extensions.
    #[serde(default)]
    pub extensions: ExtensionConfig,
}

impl TargetConfig {
    /// Validate the triple and derive the target profile.
    pub fn profile(&self) -> Result<TargetProfile> {
        TargetProfile::parse(&self.triple)
    }
}

/// Load a target description from a `.target.toml` file.
pub fn load_target_config(path: &Path) -> Result<TargetConfig> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_target_config(&content)
}

/// Parse a target description from a TOML string.
pub fn parse_target_config(toml_str: &str) -> Result<TargetConfig> {
    let config: TargetConfig = toml::from_str(toml_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_names_dedups() {
        let config = ExtensionConfig::from_names([
            "SPV_INTEL_optnone",
            "SPV_INTEL_optnone",
            "SPV_KHR_no_integer_wrap_decoration",
        ])
        .unwrap();
        assert_eq!(config.len(), 2);
        assert!(config.contains(Extension::SpvIntelOptnone));
        assert!(config.contains(Extension::SpvKhrNoIntegerWrapDecoration));
    }

    #[test]
    fn from_names_rejects_unknown() {
        let err = ExtensionConfig::from_names(["SPV_INTEL_optnone", "SPV_FOO"]).unwrap_err();
        assert!(matches!(err, TargetError::UnknownExtension { ref name } if name == "SPV_FOO"));
    }

    #[test]
    fn parse_list_tolerates_spacing() {
        let config =
            ExtensionConfig::parse_list(" SPV_INTEL_optnone , ,SPV_INTEL_arbitrary_precision_integers,")
                .unwrap();
        assert_eq!(config.len(), 2);
        assert!(ExtensionConfig::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
triple = "spirv64-unknown-opencl"
cpu = "generic"
features = "+spirv1.3,+opencl2.0"
extensions = ["SPV_INTEL_optnone", "SPV_AMD_shader_trinary_minmax_extension"]
"#;
        let config = parse_target_config(toml_str).unwrap();
        assert_eq!(config.cpu, "generic");
        assert_eq!(config.features, "+spirv1.3,+opencl2.0");
        assert!(config.extensions.contains(Extension::SpvAmdShaderTrinaryMinmaxExtension));
        assert!(config.profile().unwrap().is_opencl_env());
    }

    #[test]
    fn parse_minimal_config() {
        let config = parse_target_config("triple = \"spirv-unknown-vulkan\"\n").unwrap();
        assert!(config.cpu.is_empty());
        assert!(config.features.is_empty());
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn parse_unknown_extension_is_error() {
        let toml_str = r#"
triple = "spirv64-unknown-opencl"
extensions = ["SPV_NOPE"]
"#;
        assert!(parse_target_config(toml_str).is_err());
    }

    #[test]
    fn parse_missing_triple_is_error() {
        assert!(matches!(
            parse_target_config("cpu = \"generic\"\n"),
            Err(TargetError::Toml(_))
        ));
    }

    #[test]
    fn config_profile_rejects_foreign_triple() {
        let config = parse_target_config("triple = \"x86_64-unknown-linux-gnu\"\n").unwrap();
        assert!(matches!(config.profile(), Err(TargetError::NotSpirv { .. })));
    }

    #[test]
    fn load_not_found() {
        let result = load_target_config(Path::new("/nonexistent/path.target.toml"));
        assert!(matches!(result.unwrap_err(), TargetError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.target.toml");
        std::fs::write(
            &path,
            "triple = \"spirv32-unknown-opencl\"\nextensions = [\"SPV_INTEL_optnone\"]\n",
        )
        .unwrap();

        let config = load_target_config(&path).unwrap();
        assert_eq!(config.triple, "spirv32-unknown-opencl");
        assert!(config.extensions.contains(Extension::SpvIntelOptnone));
    }
}
