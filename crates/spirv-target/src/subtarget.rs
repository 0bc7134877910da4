//! The resolved SPIR-V subtarget.
//!
//! Resolution happens in [`SubtargetBuilder::build`] and follows a fixed
//! order, each stage consuming the previous one:
//!
//! 1. pointer width from the triple (in [`SubtargetBuilder::new`])
//! 2. feature parsing
//! 3. version defaulting
//! 4. available extensions
//! 5. available extended instruction sets (needs step 4)
//!
//! Only the final [`Subtarget`] is public, so no consumer can observe a
//! partially resolved state.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{ExtensionConfig, TargetConfig};
use crate::environment::{EnvironmentFamily, TargetProfile};
use crate::error::Result;
use crate::extension::Extension;
use crate::features::{DefaultFeatureParser, FeatureFields, FeatureParser};
use crate::inst_set::{InstructionSet, IMPLIED_EXT_INST_SETS};
use crate::triple::compute_pointer_size;
use crate::version::{
    Version, LATEST_OPENCL_VERSION, LATEST_SPIRV_VERSION, POINTER_COMPARISON_MIN_SPIRV,
};

/// Inputs for resolving a [`Subtarget`].
pub struct SubtargetBuilder {
    profile: TargetProfile,
    pointer_size: u32,
    cpu: String,
    features: String,
    extensions: ExtensionConfig,
    parser: Box<dyn FeatureParser>,
}

impl SubtargetBuilder {
    /// Start resolving `profile`. The pointer width is fixed here.
    pub fn new(profile: TargetProfile) -> Self {
        let pointer_size = compute_pointer_size(profile.triple());
        debug!("{}: pointer size {pointer_size}", profile.triple());
        Self {
            profile,
            pointer_size,
            cpu: String::new(),
            features: String::new(),
            extensions: ExtensionConfig::default(),
            parser: Box::new(DefaultFeatureParser),
        }
    }

    /// Builder for a `.target.toml` description.
    pub fn from_config(config: &TargetConfig) -> Result<Self> {
        Ok(Self::new(config.profile()?)
            .cpu(&config.cpu)
            .features(&config.features)
            .extensions(config.extensions.clone()))
    }

    pub fn cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = cpu.into();
        self
    }

    pub fn features(mut self, features: impl Into<String>) -> Self {
        self.features = features.into();
        self
    }

    /// Extensions requested for this target. Ignored outside OpenCL.
    pub fn extensions(mut self, extensions: ExtensionConfig) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replace the feature parser (defaults to [`DefaultFeatureParser`]).
    pub fn feature_parser(mut self, parser: impl FeatureParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Run every resolution step and return the immutable subtarget.
    pub fn build(self) -> Subtarget {
        let SubtargetBuilder {
            profile,
            pointer_size,
            cpu,
            features,
            extensions,
            parser,
        } = self;

        let parsed = FeaturesParsed::parse(
            Common {
                profile,
                pointer_size,
                cpu,
            },
            &features,
            parser.as_ref(),
        );
        let subtarget = parsed
            .apply_version_defaults()
            .init_available_extensions(&extensions)
            .init_available_ext_inst_sets();

        debug!(
            "{}: resolved spirv {}, opencl {}, extensions {:?}, ext inst sets {:?}",
            subtarget.profile.triple(),
            subtarget.spirv_version,
            subtarget.opencl_version,
            subtarget.available_extensions,
            subtarget.available_ext_inst_sets,
        );
        subtarget
    }
}

/// State carried unchanged through every stage.
struct Common {
    profile: TargetProfile,
    pointer_size: u32,
    cpu: String,
}

struct FeaturesParsed {
    common: Common,
    fields: FeatureFields,
}

struct VersionsDefaulted {
    common: Common,
    spirv_version: Version,
    opencl_version: Version,
}

struct ExtensionsResolved {
    versions: VersionsDefaulted,
    available_extensions: BTreeSet<Extension>,
}

impl FeaturesParsed {
    fn parse(common: Common, features: &str, parser: &dyn FeatureParser) -> Self {
        let mut fields = FeatureFields::default();
        parser.parse_features(&common.cpu, features, &mut fields);
        Self { common, fields }
    }

    fn apply_version_defaults(self) -> VersionsDefaulted {
        let spirv_version = self.fields.spirv_version.or(LATEST_SPIRV_VERSION);
        let opencl_version = self.fields.opencl_version.or(LATEST_OPENCL_VERSION);
        debug_assert!(spirv_version.is_specified() && opencl_version.is_specified());
        VersionsDefaulted {
            common: self.common,
            spirv_version,
            opencl_version,
        }
    }
}

impl VersionsDefaulted {
    // TODO: drive availability from the extension configuration alone once
    // extensions are defined for shader environments too.
    fn init_available_extensions(self, requested: &ExtensionConfig) -> ExtensionsResolved {
        let mut available_extensions = BTreeSet::new();
        if self.common.profile.is_opencl_env() {
            available_extensions.extend(requested.iter());
        } else if !requested.is_empty() {
            debug!(
                "{}: ignoring {} requested extension(s) outside OpenCL",
                self.common.profile.triple(),
                requested.len()
            );
        }
        ExtensionsResolved {
            versions: self,
            available_extensions,
        }
    }
}

impl ExtensionsResolved {
    fn init_available_ext_inst_sets(self) -> Subtarget {
        let environment = self.versions.common.profile.environment();
        let mut available_ext_inst_sets = BTreeSet::new();
        available_ext_inst_sets.insert(InstructionSet::default_for(environment));

        for (extension, set) in IMPLIED_EXT_INST_SETS {
            if self.available_extensions.contains(extension) {
                available_ext_inst_sets.insert(*set);
            }
        }

        let ExtensionsResolved {
            versions,
            available_extensions,
        } = self;
        Subtarget {
            profile: versions.common.profile,
            cpu: versions.common.cpu,
            pointer_size: versions.common.pointer_size,
            spirv_version: versions.spirv_version,
            opencl_version: versions.opencl_version,
            available_extensions,
            available_ext_inst_sets,
        }
    }
}

/// Resolved capabilities of one SPIR-V compilation target.
///
/// Immutable once built; share it with `Arc` if several consumers need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtarget {
    profile: TargetProfile,
    cpu: String,
    pointer_size: u32,
    spirv_version: Version,
    opencl_version: Version,
    available_extensions: BTreeSet<Extension>,
    available_ext_inst_sets: BTreeSet<InstructionSet>,
}

impl Subtarget {
    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    pub fn environment(&self) -> EnvironmentFamily {
        self.profile.environment()
    }

    pub fn is_opencl_env(&self) -> bool {
        self.profile.is_opencl_env()
    }

    /// Pointer width in bits.
    pub fn pointer_size(&self) -> u32 {
        self.pointer_size
    }

    pub fn spirv_version(&self) -> Version {
        self.spirv_version
    }

    pub fn opencl_version(&self) -> Version {
        self.opencl_version
    }

    pub fn is_at_least_spirv_version(&self, version: Version) -> bool {
        self.spirv_version.satisfies(version)
    }

    /// Always false outside the OpenCL environment.
    pub fn is_at_least_opencl_version(&self, version: Version) -> bool {
        if !self.is_opencl_env() {
            return false;
        }
        self.opencl_version.satisfies(version)
    }

    /// SPIR-V 1.4 added `OpPtrEqual` and `OpPtrNotEqual`.
    pub fn can_directly_compare_pointers(&self) -> bool {
        self.is_at_least_spirv_version(POINTER_COMPARISON_MIN_SPIRV)
    }

    pub fn can_use_extension(&self, extension: Extension) -> bool {
        self.available_extensions.contains(&extension)
    }

    pub fn can_use_ext_inst_set(&self, set: InstructionSet) -> bool {
        self.available_ext_inst_sets.contains(&set)
    }

    pub fn available_extensions(&self) -> impl Iterator<Item = Extension> + '_ {
        self.available_extensions.iter().copied()
    }

    pub fn available_ext_inst_sets(&self) -> impl Iterator<Item = InstructionSet> + '_ {
        self.available_ext_inst_sets.iter().copied()
    }

    /// Serializable summary for front ends.
    pub fn report(&self) -> CapabilityReport {
        CapabilityReport {
            triple: self.profile.triple().to_string(),
            environment: self.environment(),
            cpu: self.cpu.clone(),
            pointer_size: self.pointer_size,
            spirv_version: self.spirv_version,
            opencl_version: self.is_opencl_env().then_some(self.opencl_version),
            direct_pointer_comparison: self.can_directly_compare_pointers(),
            extensions: self.available_extensions().collect(),
            ext_inst_sets: self.available_ext_inst_sets().collect(),
        }
    }
}

/// Flat view of a [`Subtarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CapabilityReport {
    pub triple: String,
    pub environment: EnvironmentFamily,
    pub cpu: String,
    pub pointer_size: u32,
    pub spirv_version: Version,
    /// Present only for OpenCL targets.
    pub opencl_version: Option<Version>,
    pub direct_pointer_comparison: bool,
    pub extensions: Vec<Extension>,
    pub ext_inst_sets: Vec<InstructionSet>,
}
