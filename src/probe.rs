//! File probing: turn a file on disk into the one input string a validator
//! expects. This is the caller-side truncation layer; the validators never
//! see more than the configured sample.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::diagnostics::PdaError;
use crate::err_msg;
use crate::validators::ValidatorKind;

/// Bytes inspected to tell text from binary.
const SNIFF_BYTES: usize = 1024;

/// Magic prefix of a binary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    Pdf,
    Zip,
    Jpeg,
    Png,
    Unknown,
}

impl Signature {
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(b"%PDF") {
            Signature::Pdf
        } else if head.starts_with(b"PK") {
            Signature::Zip
        } else if head.starts_with(b"\xff\xd8\xff") {
            Signature::Jpeg
        } else if head.starts_with(b"\x89PNG\r\n\x1a\n") {
            Signature::Png
        } else {
            Signature::Unknown
        }
    }

    /// Stand-in text for a binary file.
    pub fn marker(&self) -> &'static str {
        match self {
            Signature::Pdf => "PDF_FILE_SIGNATURE_DETECTED",
            Signature::Zip => "ZIP_FILE_SIGNATURE_DETECTED",
            Signature::Jpeg => "JPEG_FILE_SIGNATURE_DETECTED",
            Signature::Png => "PNG_FILE_SIGNATURE_DETECTED",
            Signature::Unknown => "BINARY_FILE_CONTENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Sample {
    Text(String),
    Binary(Signature),
}

/// What the engine knows about a file.
#[derive(Debug, Clone, Serialize)]
pub struct FileProbe {
    pub name: String,
    /// Lowercase, without the dot; empty when the name has none.
    pub extension: String,
    pub size: u64,
    pub sample: Sample,
}

impl FileProbe {
    pub fn open(path: &Path, config: &EngineConfig) -> Result<Self, PdaError> {
        let metadata = fs::metadata(path).map_err(|e| PdaError::io(path.display(), e))?;
        if !metadata.is_file() {
            return Err(err_msg!(Input, "{} is not a regular file", path.display()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mut head = Vec::with_capacity(SNIFF_BYTES);
        File::open(path)
            .and_then(|f| f.take(SNIFF_BYTES as u64).read_to_end(&mut head))
            .map_err(|e| PdaError::io(path.display(), e))?;

        let sample = if looks_like_text(&head) {
            // A char is at most four bytes.
            let limit = config.max_content_chars.saturating_mul(4) as u64;
            let mut bytes = Vec::new();
            File::open(path)
                .and_then(|f| f.take(limit).read_to_end(&mut bytes))
                .map_err(|e| PdaError::io(path.display(), e))?;
            let text = String::from_utf8_lossy(&bytes);
            Sample::Text(text.chars().take(config.max_content_chars).collect())
        } else {
            Sample::Binary(Signature::sniff(&head))
        };

        debug!(
            "probed {} ({} bytes, {})",
            name,
            metadata.len(),
            match &sample {
                Sample::Text(_) => "text",
                Sample::Binary(sig) => sig.marker(),
            }
        );

        Ok(Self {
            name,
            extension,
            size: metadata.len(),
            sample,
        })
    }

    pub fn allowed(&self, config: &EngineConfig) -> bool {
        !self.extension.is_empty() && config.allows_extension(&self.extension)
    }

    /// The input `kind` should see for this file.
    pub fn prepare_input(&self, kind: ValidatorKind, config: &EngineConfig) -> Result<String, PdaError> {
        let input = match (kind, &self.sample) {
            (ValidatorKind::Filename, _) => self.name.clone(),
            (ValidatorKind::Filetype, _) => self.extension.clone(),
            (ValidatorKind::Content, Sample::Binary(Signature::Pdf)) => "%PDF".to_string(),
            (ValidatorKind::Content, Sample::Binary(Signature::Zip)) => "PK".to_string(),
            (ValidatorKind::Content, Sample::Binary(sig)) => sig.marker().to_string(),
            (ValidatorKind::Content, Sample::Text(text)) => head(text, config.content_sample_chars),
            (ValidatorKind::Xml | ValidatorKind::Multilevel, Sample::Text(text)) => {
                head(text, config.markup_sample_chars)
            }
            (ValidatorKind::Xml, Sample::Binary(_)) => {
                return Err(err_msg!(Input, "{} is not text-based XML", self.name));
            }
            (ValidatorKind::Multilevel, Sample::Binary(_)) => format!("<file>{}</file>", self.name),
        };
        Ok(input)
    }
}

/// Shortens `input` for display, marking the cut.
pub fn preview(input: &str, config: &EngineConfig) -> String {
    if input.chars().count() > config.preview_chars {
        format!("{}...", head(input, config.preview_chars))
    } else {
        input.to_string()
    }
}

fn head(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

/// UTF-8 without NUL bytes, allowing a multi-byte sequence cut at the end.
fn looks_like_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}
