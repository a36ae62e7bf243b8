//! Model selectors handed to the transcribers.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Weight formats a speech-to-text engine may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    PyTorch,
    CTranslate2,
    Ggml,
    Onnx,
}

impl ModelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::PyTorch => "pytorch",
            ModelFormat::CTranslate2 => "ctranslate2",
            ModelFormat::Ggml => "ggml",
            ModelFormat::Onnx => "onnx",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pytorch" => Ok(ModelFormat::PyTorch),
            "ctranslate2" => Ok(ModelFormat::CTranslate2),
            "ggml" => Ok(ModelFormat::Ggml),
            "onnx" => Ok(ModelFormat::Onnx),
            _ => Err(format!(
                "Unknown model format: {s}. Available: pytorch, ctranslate2, ggml, onnx"
            )),
        }
    }
}

/// A model selector passed to `Transcriber::transcribe`.
///
/// `name` is the logical identifier the engine understands, possibly
/// namespaced (`openai/tiny`). When `path` is set it points at local
/// weights and `name` only serves as an alias in run ids and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: ModelFormat,
}

impl TranscriptionModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            format: ModelFormat::default(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }
}
