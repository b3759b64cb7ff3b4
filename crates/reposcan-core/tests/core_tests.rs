use chrono::Utc;
use reposcan_core::{
    ActionKind, ActionLog, ContentHash, FileDigest, FileRecord, MAX_EXTENSION_ENTRIES, Manifest,
    ManifestBuilder, ScanConfig, UNKNOWN_SIZE,
};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn text_record(path: &str, ext: &str) -> FileRecord {
    FileRecord::readable(
        path,
        5,
        ext,
        ContentHash::from_hex(HELLO_SHA256).unwrap(),
        false,
        Some("hello".to_string()),
    )
}

#[test]
fn test_content_hash_creation_and_hex() {
    let bytes = [0xab; 32];
    let hash = ContentHash::new(bytes);

    let hex = hash.to_hex();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(hex.starts_with("ab"));

    assert_eq!(ContentHash::from_hex(&hex), Some(hash));
    assert_ne!(hash, ContentHash::new([0xcd; 32]));
}

#[test]
fn test_digest_string_round_trip_through_json() {
    let ok = FileDigest::Sha256(ContentHash::from_hex(HELLO_SHA256).unwrap());
    let failed = FileDigest::failed("Permission denied: /repo/secret");

    let json = serde_json::to_string(&vec![ok.clone(), failed.clone()]).unwrap();
    assert_eq!(
        json,
        format!(r#"["{HELLO_SHA256}","ERR:Permission denied: /repo/secret"]"#)
    );

    let back: Vec<FileDigest> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![ok, failed]);
}

#[test]
fn test_invalid_digest_string_is_rejected() {
    let result: Result<FileDigest, _> = serde_json::from_str(r#""not-a-digest""#);
    assert!(result.is_err());
}

#[test]
fn test_sixty_kt_then_forty_xml() {
    let mut builder = ManifestBuilder::new("/repo", Utc::now());
    for i in 0..40 {
        builder.push(text_record(&format!("res/layout_{i}.xml"), ".xml"));
    }
    for i in 0..60 {
        builder.push(text_record(&format!("src/File{i}.kt"), ".kt"));
    }
    let manifest = builder.finish();

    assert_eq!(manifest.total_files(), 100);
    assert_eq!(manifest.summary.by_extension.len(), 2);
    assert_eq!(manifest.summary.by_extension[0].0.as_str(), ".kt");
    assert_eq!(manifest.summary.by_extension[0].1, 60);
    assert_eq!(manifest.summary.by_extension[1].0.as_str(), ".xml");
    assert_eq!(manifest.summary.by_extension[1].1, 40);
}

#[test]
fn test_extension_histogram_bounded_and_sorted() {
    let mut builder = ManifestBuilder::new("/repo", Utc::now());
    for ext in 0..80u32 {
        for n in 0..=(ext % 7) {
            builder.push(text_record(&format!("d{ext}/f{n}.x{ext}"), &format!(".x{ext}")));
        }
    }
    let manifest = builder.finish();
    let summary = &manifest.summary.by_extension;

    assert!(summary.len() <= MAX_EXTENSION_ENTRIES);
    assert!(summary.windows(2).all(|w| w[0].1 >= w[1].1));
    assert_eq!(manifest.total_files() as usize, manifest.files.len());
}

#[test]
fn test_manifest_json_round_trip() {
    let mut builder = ManifestBuilder::new("/repo", Utc::now());
    builder.push(text_record("a.txt", ".txt"));
    builder.push(FileRecord::unreadable(
        "locked.bin",
        UNKNOWN_SIZE,
        ".bin",
        "Permission denied: /repo/locked.bin",
    ));
    let manifest = builder.finish();

    let json = serde_json::to_string_pretty(&manifest).unwrap();
    assert!(json.contains(r#""preview": "hello""#));
    assert!(json.contains(r#""size": -1"#));

    let back: Manifest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, manifest);
    assert_eq!(back.unreadable_files().count(), 1);
    assert_eq!(back.total_size(), 5);
}

#[test]
fn test_config_defaults_are_plain_values() {
    let config = ScanConfig::default();
    assert_eq!(config.exclude_dirs, vec![".git".to_string()]);
    assert!(config.exclude_paths.is_empty());
}

#[test]
fn test_action_log_is_caller_owned() {
    fn touch(log: &mut ActionLog, name: &str) {
        log.record(ActionKind::Wrote, name);
    }

    let mut log = ActionLog::new();
    touch(&mut log, "a");
    touch(&mut log, "b");
    assert_eq!(log.entries().len(), 2);
    assert_eq!(log.entries()[1].to_string(), "WROTE b");
}
