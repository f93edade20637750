//! End-to-end tests against a bundle directory on disk

use media_cache::prelude::*;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

const ATLAS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TextureAtlas imagePath="atlas.png">
    <SubTexture name="enemy_1" x="0" y="0" width="32" height="32"/>
    <SubTexture name="enemy_2" x="32" y="0" width="32" height="32"/>
    <SubTexture name="hero" x="64" y="0" width="32" height="48"/>
</TextureAtlas>
"#;

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn bundle() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "atlas.xml", ATLAS.as_bytes());
    write(dir.path(), "boom.caf", b"caff\x00\x01\x00\x00");
    write(dir.path(), "sfx/laser.caf", b"caff\x00\x01\x00\x00");
    write(dir.path(), "sfx/corrupt.caf", b"this is not audio");
    write(dir.path(), "late/extra.caf", b"caff\x00\x01\x00\x00");
    dir
}

fn media_for(root: &Path) -> (Rc<RefCell<NullBackend>>, Media) {
    let config = MediaConfig {
        search_paths: vec![root.to_path_buf()],
        ..MediaConfig::default()
    };
    let backend = Rc::new(RefCell::new(NullBackend::new()));
    let shared: SharedBackend = backend.clone();
    (backend, Media::new(config, shared))
}

#[test]
fn test_atlas_queries_from_disk() {
    let dir = bundle();
    let (_backend, mut media) = media_for(dir.path());

    let hero = media.atlas().texture_by_name("hero").unwrap();
    assert_eq!(hero.region(), Rectangle::new(64.0, 0.0, 32.0, 48.0));

    let enemies: Vec<String> = media
        .atlas()
        .textures_with_prefix("enemy")
        .unwrap()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(enemies, vec!["enemy_1", "enemy_2"]);
    assert_eq!(media.atlas().textures_with_prefix("zzz"), Some(Vec::new()));
}

#[test]
fn test_missing_atlas_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (_backend, mut media) = media_for(dir.path());

    assert!(media.atlas().texture_by_name("hero").is_none());
    assert!(media.atlas().textures_with_prefix("enemy").is_none());
    assert!(media.atlas().ensure_atlas_loaded().unwrap_err().is_load_failure());
}

#[test]
fn test_sound_scan_from_disk() {
    let dir = bundle();
    let (backend, mut media) = media_for(dir.path());

    media.sounds().ensure_library_loaded().unwrap();
    assert_eq!(
        media.sounds().sound_names(),
        vec!["boom.caf", "late/extra.caf", "sfx/laser.caf"]
    );

    media.sounds().play("sfx/laser.caf").unwrap();
    let mut channel = media.sounds().channel("boom.caf").unwrap();
    channel.play().unwrap();
    assert!(channel.is_playing());
    assert_eq!(backend.borrow().voices_started(), 2);

    let err = media.sounds().play("sfx/corrupt.caf").unwrap_err();
    assert!(err.is_decode_failure());
    let err = media.sounds().channel("nope.caf").unwrap_err();
    assert!(err.is_load_failure());
}

#[test]
fn test_rescan_after_release_sees_new_files() {
    let dir = bundle();
    let (_backend, mut media) = media_for(dir.path());

    media.sounds().ensure_library_loaded().unwrap();
    assert!(!media.sounds().contains("new.caf"));

    write(dir.path(), "new.caf", b"caff\x00\x01\x00\x00");
    assert!(!media.sounds().contains("new.caf"), "no staleness checks while loaded");

    media.release_all();
    media.sounds().ensure_library_loaded().unwrap();
    assert!(media.sounds().contains("new.caf"));
}
