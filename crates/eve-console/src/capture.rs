// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Capture output
//!
//! Writes the SDK's capture result to the fixed image and metadata files,
//! overwriting whatever the previous capture left there.

use std::fs;
use std::path::{Path, PathBuf};

use eve_config::OutputConfig;
use eve_sdk::{CaptureRequest, CaptureResult, CapturedImage};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};

const JPEG_QUALITY: u8 = 90;

/// What the operator asked to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Both,
    MetadataOnly,
    ImageOnly,
}

impl CaptureKind {
    pub fn request(self) -> CaptureRequest {
        match self {
            CaptureKind::Both => CaptureRequest::BOTH,
            CaptureKind::MetadataOnly => CaptureRequest::METADATA_ONLY,
            CaptureKind::ImageOnly => CaptureRequest::IMAGE_ONLY,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CaptureKind::Both => "frame (image + metadata)",
            CaptureKind::MetadataOnly => "metadata",
            CaptureKind::ImageOnly => "image",
        }
    }
}

/// Result of saving one part of a capture
#[derive(Debug)]
pub enum SaveStatus {
    NotRequested,
    Saved(PathBuf),
    /// The SDK returned nothing for this part
    Unavailable,
    Failed(HarnessError),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Complete,
    Partial,
    Failed,
}

#[derive(Debug)]
pub struct CaptureReport {
    pub frame_id: u64,
    pub metadata: SaveStatus,
    pub image: SaveStatus,
}

impl CaptureReport {
    pub fn outcome(&self) -> CaptureOutcome {
        let parts = [&self.metadata, &self.image];
        let requested = parts
            .iter()
            .filter(|s| !matches!(s, SaveStatus::NotRequested))
            .count();
        let saved = parts.iter().filter(|s| s.is_saved()).count();
        match saved {
            0 => CaptureOutcome::Failed,
            n if n == requested => CaptureOutcome::Complete,
            _ => CaptureOutcome::Partial,
        }
    }
}

/// Writes capture results to the configured output files
#[derive(Debug, Clone)]
pub struct CaptureWriter {
    image_path: PathBuf,
    metadata_path: PathBuf,
}

impl CaptureWriter {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            image_path: output.image_path(),
            metadata_path: output.metadata_path(),
        }
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Save the parts of `result` that `kind` asked for
    ///
    /// Parts are saved independently; a failure on one does not stop the other.
    pub fn save(&self, kind: CaptureKind, result: &CaptureResult) -> CaptureReport {
        let request = kind.request();

        let metadata = if !request.metadata {
            SaveStatus::NotRequested
        } else {
            match &result.metadata {
                None => SaveStatus::Unavailable,
                Some(value) => match self.write_metadata(value) {
                    Ok(path) => SaveStatus::Saved(path),
                    Err(e) => SaveStatus::Failed(e),
                },
            }
        };

        let image = if !request.image {
            SaveStatus::NotRequested
        } else {
            match &result.image {
                None => SaveStatus::Unavailable,
                Some(frame) => match self.write_image(frame) {
                    Ok(path) => SaveStatus::Saved(path),
                    Err(e) => SaveStatus::Failed(e),
                },
            }
        };

        CaptureReport {
            frame_id: result.frame_id,
            metadata,
            image,
        }
    }

    /// Write metadata as pretty-printed JSON
    pub fn write_metadata(&self, metadata: &serde_json::Value) -> HarnessResult<PathBuf> {
        let json = serde_json::to_string_pretty(metadata).map_err(|e| HarnessError::FileWrite {
            path: self.metadata_path.clone(),
            source: e.into(),
        })?;
        write_file(&self.metadata_path, json.as_bytes())?;
        info!(path = %self.metadata_path.display(), "Metadata saved");
        Ok(self.metadata_path.clone())
    }

    /// Write a frame as JPEG, encoding raw RGB frames first
    pub fn write_image(&self, frame: &CapturedImage) -> HarnessResult<PathBuf> {
        match frame {
            CapturedImage::Jpeg(bytes) => write_file(&self.image_path, bytes)?,
            CapturedImage::Rgb {
                width,
                height,
                pixels,
            } => {
                let jpeg = encode_jpeg(&self.image_path, *width, *height, pixels)?;
                write_file(&self.image_path, &jpeg)?;
            }
        }
        info!(path = %self.image_path.display(), "Image saved");
        Ok(self.image_path.clone())
    }
}

fn encode_jpeg(path: &Path, width: u32, height: u32, pixels: &[u8]) -> HarnessResult<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(HarnessError::ImageEncode {
            path: path.to_path_buf(),
            message: format!(
                "{}x{} RGB frame needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            ),
        });
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| HarnessError::ImageEncode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(jpeg)
}

fn write_file(path: &Path, contents: &[u8]) -> HarnessResult<()> {
    let to_error = |source| HarnessError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(|source| {
        warn!(path = %path.display(), "Write failed: {}", source);
        to_error(source)
    })
}
