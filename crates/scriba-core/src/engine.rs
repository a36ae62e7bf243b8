//! Static capability records for the supported speech-to-text backends.
//!
//! Descriptors carry no behavior; behavior lives in the transcriber
//! implementation paired with each descriptor by name.

use serde::{Deserialize, Serialize};

use crate::model::{ModelFormat, TranscriptionModel};

/// How an engine is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Binary,
    Bindings,
    Websocket,
}

/// Capability record of one speech-to-text backend.
///
/// `name` is the registry lookup key and is embedded verbatim into every
/// run id, so it must never contain the `_` delimiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionEngine {
    pub name: String,
    pub description: String,
    /// Runtime the engine itself runs on, e.g. "python" or "cpp".
    pub language: String,
    pub requirements: Vec<String>,
    #[serde(rename = "type")]
    pub kind: EngineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    pub license: String,
    pub forge_url: String,
    pub supported_model_formats: Vec<ModelFormat>,
}

impl TranscriptionEngine {
    /// Whether the engine accepts the model's weight format.
    pub fn supports(&self, model: &TranscriptionModel) -> bool {
        self.supported_model_formats.contains(&model.format)
    }

    /// Executable to invoke, falling back to the engine name.
    pub fn binary_name(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }
}

/// The built-in engine registry, ordered by preference.
///
/// Constructed once at startup and handed to the factory; treated as
/// read-only afterwards. Descriptors without a wired transcriber stay
/// listed so callers can tell "unknown" apart from "not implemented yet".
pub fn builtin_engines() -> Vec<TranscriptionEngine> {
    vec![
        TranscriptionEngine {
            name: "openai-whisper".to_string(),
            description: "OpenAI's reference Whisper automatic speech recognition implementation"
                .to_string(),
            language: "python".to_string(),
            requirements: vec![
                "python".to_string(),
                "pytorch".to_string(),
                "ffmpeg".to_string(),
            ],
            kind: EngineType::Binary,
            binary: Some("whisper".to_string()),
            license: "MIT".to_string(),
            forge_url: "https://github.com/openai/whisper".to_string(),
            supported_model_formats: vec![ModelFormat::PyTorch],
        },
        TranscriptionEngine {
            name: "whisper-ctranslate2".to_string(),
            description: "Whisper on the CTranslate2 inference engine, faster-whisper compatible"
                .to_string(),
            language: "python".to_string(),
            requirements: vec!["python".to_string(), "ffmpeg".to_string()],
            kind: EngineType::Binary,
            binary: Some("whisper-ctranslate2".to_string()),
            license: "MIT".to_string(),
            forge_url: "https://github.com/Softcatala/whisper-ctranslate2".to_string(),
            supported_model_formats: vec![ModelFormat::CTranslate2],
        },
        TranscriptionEngine {
            name: "whisper-timestamped".to_string(),
            description: "Multilingual Whisper with word-level timestamps and confidence"
                .to_string(),
            language: "python".to_string(),
            requirements: vec![
                "python".to_string(),
                "pytorch".to_string(),
                "ffmpeg".to_string(),
            ],
            kind: EngineType::Binary,
            binary: Some("whisper_timestamped".to_string()),
            license: "AGPL-3.0".to_string(),
            forge_url: "https://github.com/linto-ai/whisper-timestamped".to_string(),
            supported_model_formats: vec![ModelFormat::PyTorch],
        },
        TranscriptionEngine {
            name: "whisper-cpp".to_string(),
            description: "High-performance C/C++ port of Whisper".to_string(),
            language: "cpp".to_string(),
            requirements: vec![],
            kind: EngineType::Binary,
            binary: Some("whisper-cli".to_string()),
            license: "MIT".to_string(),
            forge_url: "https://github.com/ggerganov/whisper.cpp".to_string(),
            supported_model_formats: vec![ModelFormat::Ggml],
        },
        TranscriptionEngine {
            name: "transformers-js".to_string(),
            description: "Whisper through ONNX runtime bindings".to_string(),
            language: "js".to_string(),
            requirements: vec![],
            kind: EngineType::Bindings,
            binary: None,
            license: "Apache-2.0".to_string(),
            forge_url: "https://github.com/huggingface/transformers.js".to_string(),
            supported_model_formats: vec![ModelFormat::Onnx],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let engines = builtin_engines();
        for (i, engine) in engines.iter().enumerate() {
            assert!(
                !engines[i + 1..].iter().any(|other| other.name == engine.name),
                "duplicate engine name {}",
                engine.name
            );
        }
    }

    #[test]
    fn test_registry_names_avoid_run_id_delimiter() {
        for engine in builtin_engines() {
            assert!(
                !engine.name.contains('_'),
                "engine name {} would break the run id grammar",
                engine.name
            );
        }
    }

    #[test]
    fn test_supports_matches_model_format() {
        let engines = builtin_engines();
        let whisper = engines.iter().find(|e| e.name == "openai-whisper").unwrap();

        assert!(whisper.supports(&TranscriptionModel::new("tiny")));
        assert!(!whisper.supports(&TranscriptionModel::new("tiny").with_format(ModelFormat::Ggml)));
    }

    #[test]
    fn test_binary_name_falls_back_to_engine_name() {
        let engines = builtin_engines();
        let timestamped = engines.iter().find(|e| e.name == "whisper-timestamped").unwrap();
        let transformers = engines.iter().find(|e| e.name == "transformers-js").unwrap();

        assert_eq!(timestamped.binary_name(), "whisper_timestamped");
        assert_eq!(transformers.binary_name(), "transformers-js");
    }
}
