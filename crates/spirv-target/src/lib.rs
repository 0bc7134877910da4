//! SPIR-V subtarget capability resolution.
//!
//! Reconciles three independent inputs into one immutable capability snapshot:
//! - **Target triple:** architecture (pointer width) and environment family
//! - **CPU + feature string:** requested SPIR-V and OpenCL versions
//! - **Extension configuration:** optional SPIR-V extensions to enable
//!
//! Resolution runs once, in a fixed order, inside [`SubtargetBuilder::build`].
//! The resulting [`Subtarget`] is read-only and may be shared across threads
//! by the legalizer, instruction selector and other consumers.

pub mod config;
pub mod environment;
pub mod error;
pub mod extension;
pub mod features;
pub mod inst_set;
pub mod subtarget;
pub mod triple;
pub mod version;

pub use config::{ExtensionConfig, TargetConfig};
pub use environment::{EnvironmentFamily, TargetProfile};
pub use error::{Result, TargetError};
pub use extension::Extension;
pub use features::{DefaultFeatureParser, FeatureFields, FeatureParser};
pub use inst_set::InstructionSet;
pub use subtarget::{CapabilityReport, Subtarget, SubtargetBuilder};
pub use triple::{Arch, Triple};
pub use version::{Release, Version};
