use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use bytesize::ByteSize;
use hoard::{BoxError, Loader, RingError, crc32_ieee};
use hoard_configuration::{ClusterConfig, ConfigError, GroupConfig, HashKind, RingConfig};
use pretty_assertions::assert_eq;

fn echo_loader() -> Arc<dyn Loader> {
    Arc::new(|key: String| async move { Ok::<_, BoxError>(Bytes::from(key)) })
}

#[test]
fn test_cluster_deserialize() {
    let yaml = r#"
ring:
  replicas: 8
  hash: Crc32
  nodes: ["a:8001", "b:8001"]
groups:
  - name: scores
    max_bytes: 2 KiB
  - name: profiles
    max_bytes: 4096
  - name: unbounded
"#;

    let config = ClusterConfig::from_yaml(yaml).expect("failed to deserialize");

    assert_eq!(
        config.ring,
        RingConfig {
            replicas: 8,
            hash: HashKind::Crc32,
            nodes: vec!["a:8001".to_string(), "b:8001".to_string()],
        }
    );
    assert_eq!(
        config.groups,
        vec![
            GroupConfig {
                name: "scores".to_string(),
                max_bytes: Some(ByteSize::kib(2)),
            },
            GroupConfig {
                name: "profiles".to_string(),
                max_bytes: Some(ByteSize::b(4096)),
            },
            GroupConfig {
                name: "unbounded".to_string(),
                max_bytes: None,
            },
        ]
    );
    assert_eq!(config.groups[0].max_bytes(), 2048);
    assert_eq!(config.groups[2].max_bytes(), 0);
}

#[test]
fn test_ring_defaults() {
    let config = ClusterConfig::from_yaml("groups: []\n").expect("failed to deserialize");
    assert_eq!(config.ring, RingConfig::default());
    assert_eq!(config.ring.replicas, 50);
    assert_eq!(config.ring.hash, HashKind::Crc32);
}

#[test]
fn test_into_ring_places_nodes() {
    let ring = RingConfig {
        replicas: 1,
        hash: HashKind::Crc32,
        nodes: vec!["node".to_string()],
    }
    .into_ring()
    .unwrap();

    assert_eq!(ring.points(), &[crc32_ieee(b"0node")]);
    assert_eq!(ring.locate("any").map(|n| n.as_str()), Some("node"));
}

#[test]
fn test_into_shared_ring() {
    let ring = RingConfig {
        nodes: vec!["x".to_string(), "y".to_string()],
        ..RingConfig::default()
    }
    .into_shared_ring()
    .unwrap();

    assert_eq!(ring.snapshot().len(), 100);
    assert!(ring.locate("key").is_some());
}

#[test]
fn test_zero_replicas_rejected() {
    let yaml = r#"
ring:
  replicas: 0
"#;
    let config = ClusterConfig::from_yaml(yaml).unwrap();
    match config.ring.into_ring() {
        Err(ConfigError::Ring(RingError::InvalidReplicas(0))) => {}
        other => panic!("expected invalid replicas, got {other:?}"),
    }
}

#[test]
fn test_duplicate_group_rejected() {
    let yaml = r#"
groups:
  - name: scores
  - name: scores
"#;
    match ClusterConfig::from_yaml(yaml) {
        Err(ConfigError::DuplicateGroup(name)) => assert_eq!(name, "scores"),
        other => panic!("expected duplicate group, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_rejected() {
    let yaml = r#"
groups:
  - max_bytes: 10
"#;
    assert!(matches!(
        ClusterConfig::from_yaml(yaml),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_loader() {
    let config = ClusterConfig {
        groups: vec![GroupConfig {
            name: "orphan".to_string(),
            max_bytes: None,
        }],
        ..ClusterConfig::default()
    };
    match config.into_registry(&HashMap::new()) {
        Err(ConfigError::MissingLoader(name)) => assert_eq!(name, "orphan"),
        other => panic!("expected missing loader, got {other:?}"),
    }
}

#[tokio::test]
async fn test_into_registry_builds_groups() {
    let yaml = r#"
groups:
  - name: echo
    max_bytes: 10
  - name: other
"#;
    let loaders = HashMap::from([
        ("echo".to_string(), echo_loader()),
        ("other".to_string(), echo_loader()),
        ("unused".to_string(), echo_loader()),
    ]);

    let registry = ClusterConfig::from_yaml(yaml)
        .unwrap()
        .into_registry(&loaders)
        .unwrap();
    assert_eq!(registry.names(), vec!["echo", "other"]);

    let echo = registry.group("echo").unwrap();
    assert_eq!(echo.get("abc").await.unwrap().to_string(), "abc");
    assert_eq!(echo.get("defg").await.unwrap().to_string(), "defg");
    // 6 + 8 bytes exceed the budget of 10
    assert_eq!(echo.cache_len(), 1);
    assert_eq!(echo.cache_bytes(), 8);
}
