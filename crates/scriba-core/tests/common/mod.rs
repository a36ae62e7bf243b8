use std::fs;
use std::path::{Path, PathBuf};

use scriba_core::{EngineType, ModelFormat, TranscriptionEngine, builtin_engines};

pub const VTT_CONTENT: &str = "WEBVTT\n\n00:00.000 --> 00:02.000\nMay I help you?\n";

/// Builtin descriptor with the binary swapped for a stub executable.
pub fn stub_engine(name: &str, binary: &Path) -> TranscriptionEngine {
    let mut engine = builtin_engines()
        .into_iter()
        .find(|engine| engine.name == name)
        .unwrap_or_else(|| TranscriptionEngine {
            name: name.to_string(),
            description: "stub".to_string(),
            language: "sh".to_string(),
            requirements: vec![],
            kind: EngineType::Binary,
            binary: None,
            license: "MIT".to_string(),
            forge_url: String::new(),
            supported_model_formats: vec![ModelFormat::PyTorch],
        });

    engine.binary = Some(binary.to_string_lossy().into_owned());
    engine
}

#[cfg(unix)]
pub fn write_stub_binary(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn media_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("video_short.mp4");
    fs::write(&path, [0u8; 64]).unwrap();
    path
}
