//! Subtarget feature parsing.
//!
//! A CPU name and a feature string (`+spirv1.3,+opencl2.0`) are turned into
//! the version fields the resolver defaults and queries. The resolver calls
//! the parser exactly once and never inspects the raw strings itself.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::version::Version;

/// Fields a feature parser may assign. Anything left `Unspecified` is
/// defaulted by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFields {
    pub spirv_version: Version,
    pub opencl_version: Version,
}

/// Turns a CPU name and feature string into [`FeatureFields`].
pub trait FeatureParser {
    fn parse_features(&self, cpu: &str, features: &str, fields: &mut FeatureFields);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Spirv,
    OpenCl,
}

/// Feature name, the field it assigns, and the value assigned.
const FEATURES: &[(&str, Field, Version)] = &[
    ("spirv1.0", Field::Spirv, Version::new(1, 0)),
    ("spirv1.1", Field::Spirv, Version::new(1, 1)),
    ("spirv1.2", Field::Spirv, Version::new(1, 2)),
    ("spirv1.3", Field::Spirv, Version::new(1, 3)),
    ("spirv1.4", Field::Spirv, Version::new(1, 4)),
    ("spirv1.5", Field::Spirv, Version::new(1, 5)),
    ("spirv1.6", Field::Spirv, Version::new(1, 6)),
    ("opencl1.0", Field::OpenCl, Version::new(1, 0)),
    ("opencl1.1", Field::OpenCl, Version::new(1, 1)),
    ("opencl1.2", Field::OpenCl, Version::new(1, 2)),
    ("opencl2.0", Field::OpenCl, Version::new(2, 0)),
    ("opencl2.1", Field::OpenCl, Version::new(2, 1)),
    ("opencl2.2", Field::OpenCl, Version::new(2, 2)),
    ("opencl3.0", Field::OpenCl, Version::new(3, 0)),
];

/// Known processors and the features each implies.
const PROCESSORS: &[(&str, &[&str])] = &[("generic", &[])];

/// Parser for the `+feature,-feature` syntax used by compiler drivers.
///
/// Unknown processors, unknown features and entries without a `+`/`-`
/// prefix are ignored with a warning. When several versions of one field
/// are enabled the highest wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFeatureParser;

impl DefaultFeatureParser {
    /// Names accepted in feature strings.
    pub fn feature_names() -> impl Iterator<Item = &'static str> {
        FEATURES.iter().map(|(name, _, _)| *name)
    }

    /// Names accepted as CPU.
    pub fn processor_names() -> impl Iterator<Item = &'static str> {
        PROCESSORS.iter().map(|(name, _)| *name)
    }

    fn lookup(name: &str) -> Option<&'static str> {
        FEATURES
            .iter()
            .map(|(known, _, _)| *known)
            .find(|known| *known == name)
    }
}

impl FeatureParser for DefaultFeatureParser {
    fn parse_features(&self, cpu: &str, features: &str, fields: &mut FeatureFields) {
        let mut enabled: BTreeSet<&'static str> = BTreeSet::new();

        if !cpu.is_empty() {
            match PROCESSORS.iter().find(|(name, _)| *name == cpu) {
                Some((_, implied)) => enabled.extend(implied.iter().copied()),
                None => warn!(
                    "'{cpu}' is not a recognized processor for this target (ignoring processor)"
                ),
            }
        }

        for entry in features.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (enable, name) = match (entry.strip_prefix('+'), entry.strip_prefix('-')) {
                (Some(name), _) => (true, name),
                (_, Some(name)) => (false, name),
                _ => {
                    warn!("feature flag '{entry}' must start with '+' or '-' (ignoring feature)");
                    continue;
                }
            };
            let Some(name) = Self::lookup(name) else {
                warn!("'{entry}' is not a recognized feature for this target (ignoring feature)");
                continue;
            };
            if enable {
                enabled.insert(name);
            } else {
                enabled.remove(name);
            }
        }

        for (name, field, version) in FEATURES {
            if !enabled.contains(name) {
                continue;
            }
            let slot = match field {
                Field::Spirv => &mut fields.spirv_version,
                Field::OpenCl => &mut fields.opencl_version,
            };
            if !slot.is_specified() || slot.encoded() < version.encoded() {
                *slot = *version;
            }
        }

        debug!(
            "parsed features for cpu '{cpu}': spirv {}, opencl {}",
            fields.spirv_version, fields.opencl_version
        );
    }
}
