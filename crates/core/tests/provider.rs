//! End-to-end provider coverage: one temp-dir installation serving all
//! three namespaces through a single `AssetProvider`, with the
//! archived platform layout and an engine-bearing graph.

use kiln_core::codec::ZstdCodec;
use kiln_core::error::KilnError;
use kiln_core::graph::InMemoryPackageGraph;
use kiln_core::provider::{AssetProvider, PlatformLayout};
use kiln_plugin::{
    Asset, AssetId, ENGINE_PACKAGE, PLATFORM_NAMESPACE, PackageInfo, TOOL_NAMESPACE,
    VersionTemplater,
};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct PlaceholderTemplater;

impl VersionTemplater for PlaceholderTemplater {
    fn render(&self, text: &str, versions: &BTreeMap<String, String>, _source: &Path) -> String {
        let mut out = text.to_string();
        for (name, version) in versions {
            out = out.replace(&format!("@{}@", name), version);
        }
        out
    }
}

struct Fixture {
    _temp: tempfile::TempDir,
    provider: AssetProvider,
}

fn fixture() -> Fixture {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();

    // Ordinary packages: one served, one statically bundled
    let demo_root = base.join("packages/demo-1.2.0");
    fs::create_dir_all(demo_root.join("lib/sub")).unwrap();
    fs::write(demo_root.join("lib/main.kn"), "module main;").unwrap();
    fs::write(demo_root.join("lib/sub/util.kn"), "module util;").unwrap();

    let bootstrap_root = base.join("packages/bootstrap-0.1.0");
    fs::create_dir_all(bootstrap_root.join("lib")).unwrap();
    fs::write(bootstrap_root.join("lib/boot.kn"), "module boot;").unwrap();

    let engine_root = base.join("packages/graphite-0.9.4");
    fs::create_dir_all(engine_root.join("lib")).unwrap();
    fs::write(engine_root.join("lib/graph.kn"), "module graph;").unwrap();

    // Tool support sources
    let tool_root = base.join("tool-src");
    fs::create_dir_all(&tool_root).unwrap();
    fs::write(tool_root.join("serve.kn"), "engine @graphite@;").unwrap();

    // Archived platform sources inside the bundled support package
    let support_root = base.join("support");
    let archive_root = support_root.join("lib/platform");
    fs::create_dir_all(archive_root.join("core")).unwrap();
    fs::write(
        archive_root.join("core/core.kn_"),
        zstd::encode_all(&b"module core;"[..], 0).unwrap(),
    )
    .unwrap();

    let package = |name: &str, version: &str, root: PathBuf, is_static: bool| PackageInfo {
        name: name.to_string(),
        version: version.to_string(),
        root,
        is_static,
    };
    let graph = InMemoryPackageGraph::from_packages([
        package("demo", "1.2.0", demo_root, false),
        package("bootstrap", "0.1.0", bootstrap_root, true),
        package(ENGINE_PACKAGE, "0.9.4", engine_root, false),
    ]);

    let provider = AssetProvider::new(
        Arc::new(graph),
        tool_root,
        PlatformLayout::Archived { archive_root },
        Arc::new(PlaceholderTemplater),
        Arc::new(ZstdCodec),
    );

    Fixture {
        _temp: temp,
        provider,
    }
}

#[test]
fn test_namespaces_cover_packages_and_pseudo_names() {
    let fixture = fixture();
    let names = fixture.provider.namespaces();

    assert!(names.contains("demo"));
    assert!(names.contains(ENGINE_PACKAGE));
    assert!(names.contains(TOOL_NAMESPACE));
    assert!(names.contains(PLATFORM_NAMESPACE));
    // Statically bundled packages are not provisioned dynamically
    assert!(!names.contains("bootstrap"));
}

#[test]
fn test_fetch_across_all_three_namespaces() {
    let fixture = fixture();

    let ordinary = fixture
        .provider
        .fetch(&AssetId::new("demo", "lib/main.kn"))
        .unwrap();
    assert_eq!(ordinary.read_bytes().unwrap(), b"module main;");

    let tool = fixture
        .provider
        .fetch(&AssetId::new(TOOL_NAMESPACE, "lib/serve.kn"))
        .unwrap();
    match tool {
        Asset::Text { contents, .. } => assert_eq!(contents, "engine 0.9.4;"),
        other => panic!("expected templated text, got {:?}", other),
    }

    let platform = fixture
        .provider
        .fetch(&AssetId::new(PLATFORM_NAMESPACE, "lib/lib/core/core.kn"))
        .unwrap();
    assert!(matches!(platform, Asset::Stream { .. }));
    assert_eq!(platform.read_bytes().unwrap(), b"module core;");
}

#[test]
fn test_not_found_is_uniform_across_namespaces() {
    let fixture = fixture();
    let ids = [
        AssetId::new("demo", "lib/gone.kn"),
        AssetId::new(TOOL_NAMESPACE, "lib/gone.kn"),
        AssetId::new(PLATFORM_NAMESPACE, "lib/lib/gone.kn"),
    ];

    for id in ids {
        let err = fixture.provider.fetch(&id).unwrap_err();
        assert!(err.is_not_found(), "{} should be NotFound", id);
    }
}

#[test]
fn test_unknown_namespace_is_a_contract_violation() {
    let fixture = fixture();
    let err = fixture
        .provider
        .fetch(&AssetId::new("ghost", "lib/a.kn"))
        .unwrap_err();
    assert!(matches!(err, KilnError::UnknownNamespace(_)));
}

#[test]
fn test_enumerations_are_fresh_and_well_shaped() {
    let fixture = fixture();

    let demo: HashSet<AssetId> = fixture.provider.enumerate("demo").unwrap().collect();
    assert_eq!(
        demo,
        [
            AssetId::new("demo", "lib/main.kn"),
            AssetId::new("demo", "lib/sub/util.kn"),
        ]
        .into_iter()
        .collect()
    );

    let tool: Vec<AssetId> = fixture.provider.enumerate(TOOL_NAMESPACE).unwrap().collect();
    assert_eq!(tool, vec![AssetId::new(TOOL_NAMESPACE, "lib/serve.kn")]);

    let platform: Vec<AssetId> = fixture
        .provider
        .enumerate(PLATFORM_NAMESPACE)
        .unwrap()
        .collect();
    assert_eq!(
        platform,
        vec![AssetId::new(PLATFORM_NAMESPACE, "lib/lib/core/core.kn")]
    );

    // A fresh enumeration starts over
    let again: Vec<AssetId> = fixture
        .provider
        .enumerate(PLATFORM_NAMESPACE)
        .unwrap()
        .collect();
    assert_eq!(again, platform);

    // Every enumerated id fetches successfully
    for id in demo {
        assert!(fixture.provider.fetch(&id).is_ok());
    }
}
