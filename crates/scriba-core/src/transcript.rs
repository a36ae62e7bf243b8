//! Transcript files on disk: formats, IO and tolerant comparison.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TranscriptionError;
use crate::evaluation::{self, EvaluationResult};

/// Closed set of transcript serialization grammars. Doubles as the
/// on-disk file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    Txt,
    Vtt,
    Srt,
}

impl TranscriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptFormat::Txt => "txt",
            TranscriptFormat::Vtt => "vtt",
            TranscriptFormat::Srt => "srt",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn all() -> &'static [TranscriptFormat] {
        &[TranscriptFormat::Txt, TranscriptFormat::Vtt, TranscriptFormat::Srt]
    }

    /// Recovers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| extension.to_lowercase().parse().ok())
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TranscriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(TranscriptFormat::Txt),
            "vtt" => Ok(TranscriptFormat::Vtt),
            "srt" => Ok(TranscriptFormat::Srt),
            _ => Err(format!("Unknown transcript format: {s}. Available: txt, vtt, srt")),
        }
    }
}

/// A transcript produced by an engine, or written by hand as a reference.
///
/// Content is read from disk on demand and never cached, so external
/// mutation of `path` is always observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFile {
    pub path: PathBuf,
    /// ISO 639-1 code, empty when the language was not detected.
    #[serde(default)]
    pub language: String,
    pub format: TranscriptFormat,
}

impl TranscriptFile {
    /// Wraps an existing file without touching it.
    pub fn new(path: impl Into<PathBuf>, language: impl Into<String>, format: TranscriptFormat) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            format,
        }
    }

    /// Writes `content` verbatim to `path`, creating parent directories
    /// as needed, and returns the resulting handle.
    pub fn write(
        path: impl Into<PathBuf>,
        content: &str,
        format: TranscriptFormat,
        language: impl Into<String>,
    ) -> Result<Self, TranscriptionError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;

        Ok(Self {
            path,
            language: language.into(),
            format,
        })
    }

    /// Raw file content.
    pub fn read(&self) -> Result<String, TranscriptionError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Text payload with per-format timing and markup stripped.
    pub fn text_payload(&self) -> Result<String, TranscriptionError> {
        Ok(strip_markup(&self.read()?, self.format))
    }

    /// Strict equality compares raw bytes. Loose equality compares only
    /// the normalized text payload, so the same speech in vtt and srt
    /// form, or with shifted cue timings, still matches.
    pub fn equals(&self, other: &TranscriptFile, strict: bool) -> Result<bool, TranscriptionError> {
        if strict {
            return Ok(self.read()? == other.read()?);
        }

        Ok(evaluation::normalize(&self.text_payload()?)
            == evaluation::normalize(&other.text_payload()?))
    }

    /// Scores `hypothesis` against this transcript as reference.
    pub fn evaluate(&self, hypothesis: &TranscriptFile) -> Result<EvaluationResult, TranscriptionError> {
        Ok(evaluation::evaluate(
            &self.text_payload()?,
            &hypothesis.text_payload()?,
        ))
    }
}

/// Extracts cue text from a serialized transcript.
fn strip_markup(content: &str, format: TranscriptFormat) -> String {
    match format {
        TranscriptFormat::Txt => content.to_string(),
        TranscriptFormat::Vtt => strip_vtt(content),
        TranscriptFormat::Srt => strip_srt(content),
    }
}

fn strip_vtt(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut payload = Vec::new();
    let mut index = 0;

    // Header: the WEBVTT line plus any metadata up to the first blank line.
    if lines.first().is_some_and(|line| line.starts_with("WEBVTT")) {
        while index < lines.len() && !lines[index].trim().is_empty() {
            index += 1;
        }
    }

    while index < lines.len() {
        let line = lines[index].trim();

        if line.is_empty() {
            index += 1;
            continue;
        }
        // Comment and styling blocks run until the next blank line.
        if line.starts_with("NOTE") || line == "STYLE" || line == "REGION" {
            while index < lines.len() && !lines[index].trim().is_empty() {
                index += 1;
            }
            continue;
        }
        if line.contains("-->") {
            index += 1;
            continue;
        }
        // A cue identifier directly precedes a timing line.
        if lines.get(index + 1).is_some_and(|next| next.contains("-->")) {
            index += 1;
            continue;
        }

        payload.push(line);
        index += 1;
    }

    payload.join("\n")
}

fn strip_srt(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.contains("-->")
                && !line.chars().all(|character| character.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
