//! End-to-end tests for the icon preparation step.

use std::io::Cursor;
use std::path::Path;

use image::{Rgba, RgbaImage};
use pyra_icon_normalizer::config::Config;
use pyra_icon_normalizer::container::inspect_icon;
use pyra_icon_normalizer::pipeline::{PrepareRequest, prepare};
use pyra_icon_normalizer::resample;
use pyra_icon_normalizer::source::SourceKind;
use tempfile::TempDir;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const NAVY: Rgba<u8> = Rgba([20, 30, 90, 255]);

/// 300x200 white image with a 200x100 navy subject at (50, 50).
fn write_padded_logo(path: &Path) {
    let mut image = RgbaImage::from_pixel(300, 200, WHITE);
    for y in 50..150 {
        for x in 50..250 {
            image.put_pixel(x, y, NAVY);
        }
    }
    image.save(path).unwrap();
}

fn decode_entries(path: &Path) -> Vec<(u32, Vec<u8>)> {
    let bytes = std::fs::read(path).unwrap();
    let dir = ico::IconDir::read(Cursor::new(bytes)).unwrap();
    dir.entries()
        .iter()
        .map(|entry| (entry.width(), entry.decode().unwrap().rgba_data().to_vec()))
        .collect()
}

#[test]
fn prepare_resolves_and_writes_default_icon() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("PyRA.png"));

    let prepared = prepare(&PrepareRequest::new(root.path()), &Config::default()).unwrap();

    assert_eq!(prepared.source.kind, SourceKind::NamedPng);
    assert_eq!(prepared.output, root.path().join("PyRA.generated.ico"));
    assert_eq!(prepared.canvas_side, 200);
    assert_eq!(
        (prepared.subject.x, prepared.subject.y),
        (50, 50)
    );

    let sizes: Vec<u32> = inspect_icon(&prepared.output)
        .unwrap()
        .iter()
        .map(|e| e.width)
        .collect();
    assert_eq!(sizes, vec![256, 128, 64, 48, 32, 16]);
}

#[test]
fn every_entry_is_square_and_keeps_transparent_slack() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("logo.png"));

    let prepared = prepare(&PrepareRequest::new(root.path()), &Config::default()).unwrap();

    for (size, rgba) in decode_entries(&prepared.output) {
        let image = RgbaImage::from_raw(size, size, rgba).unwrap();
        // 2:1 subject leaves the top and bottom quarter transparent.
        assert_eq!(image.get_pixel(0, 0)[3], 0, "size {size}");
        assert_eq!(image.get_pixel(size / 2, size / 2)[3], 255, "size {size}");
    }
}

#[test]
fn entries_match_downscaled_master() {
    let root = TempDir::new().unwrap();
    let source = root.path().join("logo.png");
    write_padded_logo(&source);
    let config = Config::default();

    let prepared = prepare(&PrepareRequest::new(root.path()), &config).unwrap();

    let image = pyra_icon_normalizer::normalize::load_source(&source).unwrap();
    let master = pyra_icon_normalizer::normalize::normalize_image(&image, &config.icon).master;
    for (size, rgba) in decode_entries(&prepared.output) {
        let expected = resample::resize(&master, size, size, config.icon.filter_type());
        assert_eq!(rgba, expected.into_raw(), "size {size}");
    }
}

#[test]
fn rerunning_produces_identical_bytes() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("PyRA.png"));
    let config = Config::default();
    let request = PrepareRequest::new(root.path());

    let first = prepare(&request, &config).unwrap();
    let first_bytes = std::fs::read(&first.output).unwrap();
    let second = prepare(&request, &config).unwrap();

    assert_eq!(first.source.kind, SourceKind::NamedPng);
    assert_eq!(std::fs::read(&second.output).unwrap(), first_bytes);
}

#[test]
fn generated_icon_is_never_picked_as_source() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("art.png"));
    let config = Config::default();

    prepare(&PrepareRequest::new(root.path()), &config).unwrap();
    let second = prepare(&PrepareRequest::new(root.path()), &config).unwrap();

    assert_eq!(second.source.path, root.path().join("art.png"));
}

#[test]
fn explicit_source_and_output_bypass_resolution() {
    let root = TempDir::new().unwrap();
    let assets = TempDir::new().unwrap();
    let source = assets.path().join("custom.png");
    write_padded_logo(&source);
    let output = assets.path().join("out.ico");

    let request = PrepareRequest {
        root: root.path().to_path_buf(),
        source: Some(source.clone()),
        output: Some(output.clone()),
    };
    let prepared = prepare(&request, &Config::default()).unwrap();

    assert_eq!(prepared.source.kind, SourceKind::Explicit);
    assert_eq!(prepared.source.path, source);
    assert!(output.exists());
    assert!(!root.path().join("PyRA.generated.ico").exists());
}

#[test]
fn ico_source_is_renormalized() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("logo.png"));
    let config = Config::default();
    let first = prepare(&PrepareRequest::new(root.path()), &config).unwrap();
    std::fs::rename(&first.output, root.path().join("icon.ico")).unwrap();

    let prepared = prepare(&PrepareRequest::new(root.path()), &config).unwrap();

    assert_eq!(prepared.source.kind, SourceKind::NamedIco);
    assert_eq!(inspect_icon(&prepared.output).unwrap().len(), 6);
}

#[test]
fn empty_root_reports_missing_source() {
    let root = TempDir::new().unwrap();

    let err = prepare(&PrepareRequest::new(root.path()), &Config::default()).unwrap_err();

    assert!(err.to_string().contains("No icon source found"));
}

#[test]
fn undecodable_source_aborts_without_output() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("PyRA.png"), b"garbage").unwrap();

    let err = prepare(&PrepareRequest::new(root.path()), &Config::default()).unwrap_err();

    assert!(err.to_string().contains("decode"));
    assert!(!root.path().join("PyRA.generated.ico").exists());
}

#[test]
fn invalid_config_is_rejected_before_any_work() {
    let root = TempDir::new().unwrap();
    write_padded_logo(&root.path().join("PyRA.png"));
    let mut config = Config::default();
    config.icon.sizes = vec![300];

    let err = prepare(&PrepareRequest::new(root.path()), &config).unwrap_err();

    assert!(err.to_string().contains("Invalid icon configuration"));
    assert!(!root.path().join("PyRA.generated.ico").exists());
}
