// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Simulated EVE device
///
/// Deterministic stand-in for the camera module, used when no vendor binding
/// is linked (bench testing the console, CI).
///
/// **Behaviour**:
/// - Frames are `max_width` wide with a 4:3 aspect ratio and a gradient that
///   shifts with every frame
/// - JPEG frames when `to_jpg` is set, raw RGB otherwise
/// - No image is handed out when `copy_image` is off
/// - Metadata lists the enabled features with empty detection sets
/// - With a simulated FPGA, feature state and pipeline rate are reported back
///   and ULP mode is available together with the metadata camera
use eve_config::validation::MAX_FRAME_WIDTH;
use eve_config::{FeatureFlags, FeatureId, I2cConfig, SdkConfig};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{SdkError, SdkResult};
use crate::hal::EveBackend;
use crate::types::{
    CaptureRequest, CaptureResult, CapturedImage, DeviceStatus, FeatureState, FeatureStateReport,
};

const JPEG_QUALITY: u8 = 85;

/// Features the FPGA pipeline reports on
const FPGA_REPORTED: [FeatureId; 4] = [
    FeatureId::FaceDetection,
    FeatureId::FaceId,
    FeatureId::PersonDetection,
    FeatureId::HandLandmarks,
];

/// Inference rate the simulated FPGA pipelines report
const FPGA_IPS: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    fpga: bool,
    sdk: Option<SdkConfig>,
    features: FeatureFlags,
    frame_id: u64,
    ulp_enabled: bool,
    registered_faces: u32,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an FPGA-backed module
    pub fn with_fpga(mut self, fpga: bool) -> Self {
        self.fpga = fpga;
        self
    }

    pub fn registered_faces(&self) -> u32 {
        self.registered_faces
    }

    pub fn features(&self) -> FeatureFlags {
        self.features
    }

    fn sdk(&self) -> SdkResult<&SdkConfig> {
        self.sdk.as_ref().ok_or(SdkError::NotInitialized)
    }

    fn frame_size(sdk: &SdkConfig) -> (u32, u32) {
        let width = sdk.max_width.max(1);
        let height = (width * 3 / 4).max(1);
        (width, height)
    }

    fn render_frame(&self, width: u32, height: u32) -> Vec<u8> {
        let shift = (self.frame_id.wrapping_mul(16) % 256) as u8;
        let (width, height) = (width as usize, height as usize);
        let mut pixels = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(shift);
            }
        }
        pixels
    }

    fn capture_image(&self, sdk: &SdkConfig) -> SdkResult<CapturedImage> {
        let (width, height) = Self::frame_size(sdk);
        let pixels = self.render_frame(width, height);

        if !sdk.to_jpg {
            return Ok(CapturedImage::Rgb {
                width,
                height,
                pixels,
            });
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
            .encode(&pixels, width, height, ExtendedColorType::Rgb8)
            .map_err(|e| SdkError::Capture(format!("JPEG encoding failed: {}", e)))?;
        Ok(CapturedImage::Jpeg(jpeg))
    }

    fn capture_metadata(&self, sdk: &SdkConfig) -> Value {
        let (width, height) = Self::frame_size(sdk);
        let mut detections = Map::new();
        for (feature, enabled) in self.features.iter() {
            if !enabled {
                continue;
            }
            let entry = match feature {
                FeatureId::FaceDetection => json!({ "faces": [] }),
                FeatureId::PersonDetection => json!({ "persons": [] }),
                FeatureId::HandLandmarks => json!({ "hands": [] }),
                FeatureId::FaceId | FeatureId::FaceIdMulti => {
                    json!({ "registered": self.registered_faces, "matches": [] })
                }
                FeatureId::ObjectDetection => json!({ "objects": [] }),
            };
            detections.insert(feature.name().to_string(), entry);
        }

        let enabled: Map<String, Value> = self
            .features
            .iter()
            .map(|(feature, enabled)| (feature.name().to_string(), Value::Bool(enabled)))
            .collect();

        json!({
            "frame_id": self.frame_id,
            "resolution": { "width": width, "height": height },
            "features": enabled,
            "detections": detections,
        })
    }
}

impl EveBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn initialize(&mut self, i2c: &I2cConfig, sdk: &SdkConfig) -> SdkResult<()> {
        if sdk.max_width == 0 || sdk.max_width > MAX_FRAME_WIDTH {
            return Err(SdkError::Init(format!(
                "max_width {} outside 1..={}",
                sdk.max_width, MAX_FRAME_WIDTH
            )));
        }
        debug!(
            bus = i2c.bus,
            address = i2c.device_address,
            irq_pin = i2c.irq_pin,
            fpga = self.fpga,
            "Simulated device attached"
        );
        self.sdk = Some(sdk.clone());
        self.frame_id = 0;
        self.ulp_enabled = false;
        Ok(())
    }

    fn configure_features(&mut self, features: &FeatureFlags) -> SdkResult<()> {
        self.sdk()?;
        self.features = *features;
        Ok(())
    }

    fn device_feature_state(&mut self) -> SdkResult<Option<FeatureStateReport>> {
        self.sdk()?;
        if !self.fpga {
            return Ok(None);
        }
        Ok(Some(
            FPGA_REPORTED
                .iter()
                .map(|&feature| FeatureState {
                    feature,
                    enabled: self.features.get(feature),
                    max_ips: Some(FPGA_IPS),
                })
                .collect(),
        ))
    }

    fn capture(&mut self, request: CaptureRequest) -> SdkResult<CaptureResult> {
        let sdk = self.sdk()?.clone();
        self.frame_id += 1;

        let image = if request.image && sdk.copy_image {
            Some(self.capture_image(&sdk)?)
        } else {
            None
        };
        let metadata = request.metadata.then(|| self.capture_metadata(&sdk));

        Ok(CaptureResult {
            frame_id: self.frame_id,
            image,
            metadata,
        })
    }

    fn status(&self) -> DeviceStatus {
        DeviceStatus {
            frame_id: self.frame_id,
            fpga_enabled: self.fpga,
            metadata_camera: self.sdk.as_ref().map_or(false, |sdk| sdk.use_metadata_camera),
            ulp_enabled: self.ulp_enabled,
        }
    }

    fn set_ulp(&mut self, enabled: bool) -> SdkResult<()> {
        let metadata_camera = self.sdk()?.use_metadata_camera;
        if !(self.fpga && metadata_camera) {
            return Err(SdkError::Unsupported(
                "ULP mode requires FPGA and metadata camera".to_string(),
            ));
        }
        self.ulp_enabled = enabled;
        Ok(())
    }

    fn register_face_id(&mut self) -> SdkResult<()> {
        self.sdk()?;
        if !(self.features.get(FeatureId::FaceId) || self.features.get(FeatureId::FaceIdMulti)) {
            return Err(SdkError::Unsupported(
                "enable Face ID or Face ID Multi before registering".to_string(),
            ));
        }
        self.registered_faces += 1;
        Ok(())
    }

    fn clear_face_ids(&mut self) -> SdkResult<()> {
        self.sdk()?;
        self.registered_faces = 0;
        Ok(())
    }

    fn shutdown(&mut self) -> SdkResult<()> {
        if self.sdk.take().is_none() {
            return Err(SdkError::NotInitialized);
        }
        self.ulp_enabled = false;
        Ok(())
    }
}
