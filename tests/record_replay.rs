//! Record-replay round-trip integration tests.
//!
//! 1. Build a cassette with `CassetteRecorder` and replay it through
//!    `ServiceContext::replaying()`, twice, asserting identical outputs.
//! 2. Record a real `vtquest` run with `VTQUEST_RECORD`, then replay the
//!    session directory with `VTQUEST_REPLAY` against a source that no
//!    longer exists.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;

use vtquest::cassette::recorder::CassetteRecorder;
use vtquest::context::ServiceContext;
use vtquest::{Catalog, Error};

const DOCUMENT: &str = r#"{
    "Bell Hall": {
        "abbreviation": "BEL",
        "category": "Academic",
        "description": "Lecture rooms.",
        "location": "37.231,-80.4213"
    }
}"#;

const SOURCE: &str = "http://example.invalid/places.json";

/// Loads the catalog and asks for a fix, returning a snapshot of the outputs.
async fn exercise_ports(ctx: &ServiceContext) -> (Vec<String>, String, Result<Vec<u8>, String>) {
    let catalog = Catalog::load(ctx.source.as_ref(), SOURCE).await.unwrap();
    let fix = ctx.location.current_fix().unwrap().to_string();
    let image = ctx
        .images
        .fetch("http://example.invalid/bell.jpg")
        .await
        .map_err(|e| e.to_string());
    (catalog.directory().names().to_vec(), fix, image)
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let dir = std::env::temp_dir().join("vtquest_record_replay_test");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("roundtrip.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&cassette_path, "roundtrip-test");
    recorder.record("directory", "fetch", json!({"location": SOURCE}), json!({"ok": DOCUMENT}));
    recorder.record(
        "location",
        "current_fix",
        json!({}),
        json!({"ok": {"latitude": 37.25, "longitude": -80.5}}),
    );
    recorder.record(
        "images",
        "fetch",
        json!({"url": "http://example.invalid/bell.jpg"}),
        json!({"err": "404 Not Found"}),
    );
    let written_path = recorder.finish().expect("recording should succeed");
    assert_eq!(written_path, cassette_path);

    let ctx1 = ServiceContext::replaying(&cassette_path).unwrap();
    let first = exercise_ports(&ctx1).await;
    assert_eq!(first.0, ["Bell Hall"]);
    assert_eq!(first.1, "37.25,-80.5");
    assert_eq!(first.2, Err("404 Not Found".to_string()));

    // Determinism: a second replay gives the same outputs.
    let ctx2 = ServiceContext::replaying(&cassette_path).unwrap();
    assert_eq!(exercise_ports(&ctx2).await, first);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn replayed_fetch_error_is_unreachable_source() {
    let dir = std::env::temp_dir().join("vtquest_record_replay_err_test");
    let cassette_path = dir.join("down.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&cassette_path, "server-down");
    recorder.record(
        "directory",
        "fetch",
        json!({"location": SOURCE}),
        json!({"err": "connection refused"}),
    );
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let err = Catalog::load(ctx.source.as_ref(), SOURCE).await.unwrap_err();
    assert_eq!(
        err,
        Error::SourceUnreachable {
            location: SOURCE.into(),
            reason: "connection refused".into(),
        }
    );

    let _ = std::fs::remove_dir_all(&dir);
}

fn run_with_env(args: &[&str], key: &str, value: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vtquest"))
        .args(args)
        .env_remove("VTQUEST_RECORD")
        .env_remove("VTQUEST_REPLAY")
        .env_remove("VTQUEST_LOCATION_AUTHORIZED")
        .env(key, value)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run vtquest binary")
}

fn only_session_dir(root: &Path) -> PathBuf {
    let mut sessions: Vec<PathBuf> = std::fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.is_dir())
        .collect();
    assert_eq!(sessions.len(), 1, "expected exactly one recorded session");
    sessions.remove(0)
}

#[test]
fn recorded_cli_session_replays_without_the_source() {
    let root = std::env::temp_dir().join("vtquest_cli_record_test");
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    let source = root.join("places.json");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/places.json");
    std::fs::copy(fixture, &source).unwrap();
    let cassettes = root.join("cassettes");

    let args = [
        "here",
        "--map-type",
        "roadmap",
        "--at",
        "37.25,-80.5",
        "--source",
        source.to_str().unwrap(),
    ];
    let recorded = run_with_env(&args, "VTQUEST_RECORD", &cassettes);
    assert!(recorded.status.success(), "{}", String::from_utf8_lossy(&recorded.stderr));
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to:"));

    let session = only_session_dir(&cassettes);
    assert!(session.join("directory.cassette.yaml").exists());
    assert!(session.join("location.cassette.yaml").exists());

    std::fs::remove_file(&source).unwrap();
    let replayed = run_with_env(&args, "VTQUEST_REPLAY", &session);
    assert!(replayed.status.success(), "{}", String::from_utf8_lossy(&replayed.stderr));
    assert_eq!(replayed.stdout, recorded.stdout);

    let _ = std::fs::remove_dir_all(&root);
}
