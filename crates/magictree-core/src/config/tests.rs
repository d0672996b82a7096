use super::*;

use crate::detector::Detector;

fn signature(identifier: &str, magic: &str) -> SignatureConfig {
    SignatureConfig {
        parent: default_parent(),
        identifier: identifier.to_string(),
        extension: String::new(),
        aliases: Vec::new(),
        offset: 0,
        magic: magic.to_string(),
    }
}

// ---- Parsing ----

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.read_limit, DEFAULT_READ_LIMIT);
    assert!(config.signatures.is_empty());
}

#[test]
fn test_full_config_parses() {
    let config = Config::from_toml_str(
        r#"
read_limit = 512

[[signatures]]
parent = "text/plain"
identifier = "text/x-makefile"
extension = ".mk"
magic = "23 20 4d 61 6b 65"

[[signatures]]
identifier = "application/x-custom"
aliases = ["application/x-custom-data"]
offset = 4
magic = "CAFED00D"
"#,
    )
    .unwrap();

    assert_eq!(config.read_limit, 512);
    assert_eq!(config.signatures.len(), 2);

    let makefile = &config.signatures[0];
    assert_eq!(makefile.parent, "text/plain");
    assert_eq!(makefile.magic_bytes().unwrap(), b"# Make");

    let custom = &config.signatures[1];
    assert_eq!(custom.parent, OCTET_STREAM);
    assert_eq!(custom.offset, 4);
    assert_eq!(custom.aliases, ["application/x-custom-data"]);
    assert_eq!(custom.magic_bytes().unwrap(), [0xCA, 0xFE, 0xD0, 0x0D]);
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = Config::from_toml_str("read_limt = 10").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_magic_is_rejected() {
    let err = Config::from_toml_str(
        r#"
[[signatures]]
identifier = "application/x-nomagic"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ---- Validation ----

#[test]
fn test_empty_identifier_is_rejected() {
    let config = Config {
        signatures: vec![signature("ok/ok", "00"), signature("  ", "00")],
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::EmptyIdentifier { index: 1 }));
}

#[test]
fn test_blank_magic_is_rejected() {
    for magic in ["", "   ", "\n\t"] {
        let err = signature("application/x-test", magic)
            .magic_bytes()
            .unwrap_err();
        assert!(
            matches!(&err, ConfigError::EmptyMagic { identifier } if identifier == "application/x-test"),
            "magic {magic:?}: {err}"
        );
    }
}

#[test]
fn test_invalid_magic_carries_hex_error() {
    for (magic, expected) in [
        ("abc", hex::FromHexError::OddLength),
        ("zz", hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 }),
        ("0x1f", hex::FromHexError::InvalidHexCharacter { c: 'x', index: 1 }),
        ("1F 8G", hex::FromHexError::InvalidHexCharacter { c: 'G', index: 3 }),
    ] {
        let err = signature("application/x-test", magic)
            .magic_bytes()
            .unwrap_err();
        match err {
            ConfigError::InvalidMagic { source, .. } => assert_eq!(source, expected, "magic {magic:?}"),
            other => panic!("unexpected error for {magic:?}: {other}"),
        }
    }
}

#[test]
fn test_non_ascii_magic_is_not_a_length_error() {
    let err = signature("application/x-test", "\u{e9}1")
        .magic_bytes()
        .unwrap_err();
    match err {
        ConfigError::InvalidMagic { source, .. } => assert_eq!(
            source,
            hex::FromHexError::InvalidHexCharacter { c: '\u{e9}', index: 0 }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_magic_message_names_signature() {
    let err = Config::from_toml_str(
        r#"
[[signatures]]
identifier = "application/x-broken"
magic = "G0"
"#,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("application/x-broken"));
    assert!(message.contains("G0"));
}

#[test]
fn test_hex_is_case_insensitive_and_ignores_whitespace() {
    let sig = signature("application/x-test", "1F 8b\n\tFF");
    assert_eq!(sig.magic_bytes().unwrap(), [0x1F, 0x8B, 0xFF]);
}

// ---- Nodes ----

#[test]
fn test_signature_builds_matching_node() {
    let mut sig = signature("application/x-test", "4d 5a");
    sig.extension = ".tst".to_string();
    sig.offset = 2;
    sig.aliases = vec!["application/x-test-alias".to_string()];

    let node = sig.to_node().unwrap();
    assert_eq!(node.identifier(), "application/x-test");
    assert_eq!(node.extension(), ".tst");
    assert_eq!(node.aliases(), ["application/x-test-alias"]);
    assert!(node.detector().matches(b"..MZ", 3072));
    assert!(!node.detector().matches(b"MZ", 3072));
}

// ---- Files ----

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".magictree.toml");
    std::fs::write(&path, "read_limit = 64\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.read_limit, 64);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

// ---- Schema ----

#[test]
fn test_schema_describes_fields() {
    let schema = serde_json::to_value(Config::json_schema()).unwrap();
    let properties = &schema["properties"];
    assert!(properties.get("read_limit").is_some());
    assert!(properties.get("signatures").is_some());

    let text = schema.to_string();
    assert!(text.contains("magic"));
    assert!(text.contains("identifier"));
}
