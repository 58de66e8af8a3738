use super::*;
use std::fs::File;
use std::time::Duration;
use tempfile::TempDir;

const OUTPUT: &str = "PyRA.generated.ico";

/// Create `name` in `dir` with a modification time `age_secs` before a fixed epoch.
fn touch(dir: &Path, name: &str, age_secs: u64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"x").unwrap();
    let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 - age_secs);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(time)
        .unwrap();
    path
}

fn resolve(dir: &Path) -> Option<SourceChoice> {
    resolve_source(dir, &SourceConfig::default(), OUTPUT).unwrap()
}

#[test]
fn test_named_ico_wins_over_everything() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "PyRA.png", 100);
    touch(temp.path(), "fresh.png", 0);
    let ico = touch(temp.path(), "app.ico", 500);

    let choice = resolve(temp.path()).unwrap();

    assert_eq!(choice.path, ico);
    assert_eq!(choice.kind, SourceKind::NamedIco);
}

#[test]
fn test_ico_names_are_tried_in_order() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "PyRA.ico", 0);
    let first = touch(temp.path(), "icon.ico", 10);

    assert_eq!(resolve(temp.path()).unwrap().path, first);
}

#[test]
fn test_named_png_beats_newer_images() {
    let temp = TempDir::new().unwrap();
    let named = touch(temp.path(), "PyRA.png", 1000);
    touch(temp.path(), "screenshot.png", 0);

    let choice = resolve(temp.path()).unwrap();

    assert_eq!(choice.path, named);
    assert_eq!(choice.kind, SourceKind::NamedPng);
}

#[test]
fn test_newest_image_is_picked() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "old.png", 300);
    let newest = touch(temp.path(), "logo.JPEG", 10);
    touch(temp.path(), "middle.jpg", 100);

    let choice = resolve(temp.path()).unwrap();

    assert_eq!(choice.path, newest);
    assert_eq!(choice.kind, SourceKind::Newest);
}

#[test]
fn test_generated_icons_are_skipped() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "PyRA.generated.png", 0);
    let real = touch(temp.path(), "artwork.png", 50);

    assert_eq!(resolve(temp.path()).unwrap().path, real);
}

#[test]
fn test_non_image_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "notes.txt", 0);
    touch(temp.path(), "PyRA.generated.ico", 0);
    touch(temp.path(), "artwork.gif", 0);

    assert_eq!(resolve(temp.path()), None);
}

#[test]
fn test_directories_named_like_images_are_ignored() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("icon.ico")).unwrap();
    std::fs::create_dir(temp.path().join("folder.png")).unwrap();
    let real = touch(temp.path(), "real.png", 100);

    assert_eq!(resolve(temp.path()).unwrap().path, real);
}

#[test]
fn test_mtime_ties_break_by_name() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "b.png", 5);
    let a = touch(temp.path(), "a.png", 5);

    assert_eq!(resolve(temp.path()).unwrap().path, a);
}

#[test]
fn test_empty_root_resolves_to_none() {
    let temp = TempDir::new().unwrap();
    assert_eq!(resolve(temp.path()), None);
}

#[test]
fn test_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    let err = resolve_source(&missing, &SourceConfig::default(), OUTPUT).unwrap_err();

    assert!(err.to_string().contains("project root"));
}

#[test]
fn test_is_generated() {
    let config = SourceConfig::default();

    assert!(is_generated("PyRA.generated.ico", &config, OUTPUT));
    assert!(is_generated("logo.generated.png", &config, OUTPUT));
    assert!(is_generated("custom.ico", &config, "custom.ico"));
    assert!(!is_generated("PyRA.png", &config, OUTPUT));
}

#[test]
fn test_empty_marker_only_excludes_output() {
    let config = SourceConfig {
        generated_marker: String::new(),
        ..Default::default()
    };

    assert!(!is_generated("logo.generated.png", &config, OUTPUT));
    assert!(is_generated(OUTPUT, &config, OUTPUT));
}

#[test]
fn test_source_kind_display() {
    assert_eq!(SourceKind::NamedIco.to_string(), "named .ico");
    assert_eq!(SourceKind::Newest.to_string(), "newest image");
}
