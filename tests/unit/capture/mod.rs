use super::*;
use crate::capture::adapter::CaptureAdapter as _;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "broken_lines_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn ensure_parent_dir_creates_missing_directories() {
    let root = temp_dir("ensure_parent");
    let file = root.join("a").join("b").join("out.png");
    ensure_parent_dir(&file).unwrap();
    assert!(root.join("a").join("b").is_dir());
    assert!(!file.exists());
    std::fs::remove_dir_all(&root).unwrap();

    ensure_parent_dir(Path::new("bare.png")).unwrap();
}

#[test]
fn adapter_from_config_builds_png_adapter_without_touching_disk() {
    let dir = temp_dir("adapter_from_config");
    let cfg = CaptureConfig {
        format: CaptureFormat::Png,
        out: dir.clone(),
        fps: 60,
    };
    let mut adapter = adapter_from_config(&cfg, Canvas::new(4, 4).unwrap(), Rgba8::rgb(0, 0, 0));
    adapter.start().unwrap();
    assert!(!dir.exists());
}
