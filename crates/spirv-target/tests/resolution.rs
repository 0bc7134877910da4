//! End-to-end resolution of SPIR-V subtargets from triple, features and
//! extension configuration.

use std::sync::Arc;
use std::thread;

use spirv_target::{
    Extension, ExtensionConfig, InstructionSet, Subtarget, SubtargetBuilder, TargetProfile,
    Version,
};

fn build(triple: &str, features: &str, extensions: ExtensionConfig) -> Subtarget {
    SubtargetBuilder::new(TargetProfile::parse(triple).unwrap())
        .cpu("generic")
        .features(features)
        .extensions(extensions)
        .build()
}

#[test]
fn pointer_width_per_arch() {
    for (triple, expected) in [
        ("spirv64-unknown-unknown", 64),
        ("spirv64-unknown-opencl", 64),
        ("spirv32-unknown-unknown", 32),
        ("spirv32-unknown-opencl", 32),
        ("spirv-unknown-vulkan1.3", 32),
    ] {
        let st = build(triple, "", ExtensionConfig::new());
        assert_eq!(st.pointer_size(), expected, "{triple}");
    }
}

#[test]
fn unset_spirv_version_defaults_to_latest() {
    let st = build("spirv64-unknown-unknown", "", ExtensionConfig::new());
    assert_eq!(st.spirv_version(), Version::new(1, 4));
    assert!(st.spirv_version().is_specified());
    assert!(st.opencl_version().is_specified());
    assert!(st.can_directly_compare_pointers());
}

#[test]
fn explicit_spirv_version_compares() {
    for k in 0..=6u8 {
        let st = build(
            "spirv32-unknown-opencl",
            &format!("+spirv1.{k}"),
            ExtensionConfig::new(),
        );
        for x in 0..=6u8 {
            assert_eq!(
                st.is_at_least_spirv_version(Version::new(1, x)),
                k >= x,
                "version 1.{k} vs 1.{x}"
            );
        }
        assert_eq!(st.can_directly_compare_pointers(), k >= 4);
    }
}

#[test]
fn opencl_version_only_in_opencl() {
    let shader = build("spirv64-unknown-vulkan", "+opencl1.0", ExtensionConfig::new());
    assert!(!shader.is_at_least_opencl_version(Version::new(1, 0)));
    assert!(!shader.is_at_least_opencl_version(Version::Unspecified));

    let kernel = build("spirv64-unknown-opencl", "+opencl2.0", ExtensionConfig::new());
    assert!(kernel.is_at_least_opencl_version(Version::new(1, 2)));
    assert!(kernel.is_at_least_opencl_version(Version::new(2, 0)));
    assert!(!kernel.is_at_least_opencl_version(Version::new(2, 1)));
}

#[test]
fn requested_extensions_enabled_in_opencl() {
    let config = ExtensionConfig::from_names([
        "SPV_INTEL_arbitrary_precision_integers",
        "SPV_KHR_no_integer_wrap_decoration",
    ])
    .unwrap();
    let st = build("spirv64-unknown-opencl", "", config);
    assert!(st.can_use_extension(Extension::SpvIntelArbitraryPrecisionIntegers));
    assert!(st.can_use_extension(Extension::SpvKhrNoIntegerWrapDecoration));
    assert!(!st.can_use_extension(Extension::SpvIntelOptnone));
    assert!(!st.can_use_extension(Extension::SpvAmdShaderTrinaryMinmaxExtension));
    assert_eq!(
        st.available_ext_inst_sets().collect::<Vec<_>>(),
        vec![InstructionSet::OpenClStd]
    );
}

#[test]
fn unknown_os_resolves_as_opencl() {
    let st = build(
        "spirv64-unknown-unknown",
        "",
        [Extension::SpvIntelOptnone].into_iter().collect(),
    );
    assert!(st.is_opencl_env());
    assert!(st.can_use_extension(Extension::SpvIntelOptnone));
    assert_eq!(
        st.available_ext_inst_sets().collect::<Vec<_>>(),
        vec![InstructionSet::OpenClStd]
    );

    let logical = build("spirv-unknown-unknown", "", ExtensionConfig::new());
    assert!(!logical.is_opencl_env());
    assert!(logical.can_use_ext_inst_set(InstructionSet::GlslStd450));
}

#[test]
fn no_extensions_outside_opencl() {
    let config: ExtensionConfig = Extension::ALL.into_iter().collect();
    let st = build("spirv-unknown-vulkan", "", config);
    for ext in Extension::ALL {
        assert!(!st.can_use_extension(ext), "{ext}");
    }
    assert_eq!(
        st.available_ext_inst_sets().collect::<Vec<_>>(),
        vec![InstructionSet::GlslStd450]
    );
}

#[test]
fn trinary_minmax_flips_only_its_library() {
    let base = build("spirv64-unknown-opencl", "", ExtensionConfig::new());
    let extended = build(
        "spirv64-unknown-opencl",
        "",
        [Extension::SpvAmdShaderTrinaryMinmaxExtension]
            .into_iter()
            .collect(),
    );

    assert!(!base.can_use_ext_inst_set(InstructionSet::SpvAmdShaderTrinaryMinmax));
    assert!(extended.can_use_ext_inst_set(InstructionSet::SpvAmdShaderTrinaryMinmax));
    for set in [InstructionSet::OpenClStd, InstructionSet::GlslStd450] {
        assert_eq!(base.can_use_ext_inst_set(set), extended.can_use_ext_inst_set(set));
    }
}

#[test]
fn shader_spirv13_without_extensions() {
    let st = build("spirv64-unknown-vulkan", "+spirv1.3", ExtensionConfig::new());
    assert_eq!(st.pointer_size(), 64);
    assert!(!st.is_at_least_spirv_version(Version::new(1, 4)));
    assert!(st.is_at_least_spirv_version(Version::new(1, 3)));
    assert!(!st.can_directly_compare_pointers());
    assert!(st.can_use_ext_inst_set(InstructionSet::GlslStd450));
    assert!(!st.can_use_ext_inst_set(InstructionSet::OpenClStd));
    for ext in Extension::ALL {
        assert!(!st.can_use_extension(ext));
    }
}

#[test]
fn independent_targets_do_not_interfere() {
    let a = build(
        "spirv64-unknown-opencl",
        "+spirv1.2",
        [Extension::SpvIntelOptnone].into_iter().collect(),
    );
    let b = build("spirv64-unknown-opencl", "+spirv1.5", ExtensionConfig::new());

    assert!(a.can_use_extension(Extension::SpvIntelOptnone));
    assert!(!b.can_use_extension(Extension::SpvIntelOptnone));
    assert!(!a.can_directly_compare_pointers());
    assert!(b.can_directly_compare_pointers());
}

#[test]
fn snapshot_shared_across_threads() {
    let st = Arc::new(build(
        "spirv64-unknown-opencl",
        "+spirv1.4,+opencl2.1",
        [Extension::SpvAmdShaderTrinaryMinmaxExtension]
            .into_iter()
            .collect(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let st = Arc::clone(&st);
            thread::spawn(move || {
                st.can_directly_compare_pointers()
                    && st.is_at_least_opencl_version(Version::new(2, 1))
                    && st.can_use_ext_inst_set(InstructionSet::SpvAmdShaderTrinaryMinmax)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn subtarget_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Subtarget>();
}
