//! Common test utilities and helpers

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::path::PathBuf;
use std::rc::Rc;

use eve_config::{save_config, EveConfig, FeatureFlags, FeatureId, I2cConfig, SdkConfig};
use eve_console::{run_console, ConsoleOptions, HarnessResult, InputSource};
use eve_sdk::{
    CaptureRequest, CaptureResult, CapturedImage, DeviceStatus, EveBackend, FeatureState,
    SdkError, SdkResult,
};
use serde_json::json;
use tempfile::TempDir;

/// Calls seen by a [`MockBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialize,
    Configure(FeatureFlags),
    Capture(CaptureRequest),
    SetUlp(bool),
    RegisterFace,
    ClearFaces,
    Shutdown,
}

/// Shared view of what a mock backend was asked to do
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn last_configured(&self) -> Option<FeatureFlags> {
        self.0.borrow().iter().rev().find_map(|c| match c {
            Call::Configure(flags) => Some(*flags),
            _ => None,
        })
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Scriptable backend that records every call
#[derive(Debug, Default)]
pub struct MockBackend {
    pub log: CallLog,
    pub fail_init: bool,
    pub fail_capture: bool,
    pub fail_shutdown: bool,
    /// Feature state reported after configuration
    pub readback: Option<Vec<FeatureState>>,
    pub image: bool,
    pub metadata: bool,
    frame_id: u64,
    ulp: bool,
}

impl MockBackend {
    /// Backend that returns both image and metadata
    pub fn new() -> (Self, CallLog) {
        let backend = Self {
            image: true,
            metadata: true,
            ..Self::default()
        };
        let log = backend.log.clone();
        (backend, log)
    }

    pub fn failing_capture() -> (Self, CallLog) {
        let (mut backend, log) = Self::new();
        backend.fail_capture = true;
        (backend, log)
    }
}

impl EveBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn initialize(&mut self, _i2c: &I2cConfig, _sdk: &SdkConfig) -> SdkResult<()> {
        self.log.push(Call::Initialize);
        if self.fail_init {
            return Err(SdkError::Init("device not found on bus".to_string()));
        }
        Ok(())
    }

    fn configure_features(&mut self, features: &FeatureFlags) -> SdkResult<()> {
        self.log.push(Call::Configure(*features));
        Ok(())
    }

    fn device_feature_state(&mut self) -> SdkResult<Option<Vec<FeatureState>>> {
        Ok(self.readback.clone())
    }

    fn capture(&mut self, request: CaptureRequest) -> SdkResult<CaptureResult> {
        self.log.push(Call::Capture(request));
        if self.fail_capture {
            return Err(SdkError::Capture("sensor timeout".to_string()));
        }
        self.frame_id += 1;
        Ok(CaptureResult {
            frame_id: self.frame_id,
            image: (request.image && self.image)
                .then(|| CapturedImage::Jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9])),
            metadata: (request.metadata && self.metadata)
                .then(|| json!({ "frame_id": self.frame_id, "faces": [] })),
        })
    }

    fn status(&self) -> DeviceStatus {
        DeviceStatus {
            frame_id: self.frame_id,
            ulp_enabled: self.ulp,
            ..DeviceStatus::default()
        }
    }

    fn set_ulp(&mut self, enabled: bool) -> SdkResult<()> {
        self.log.push(Call::SetUlp(enabled));
        self.ulp = enabled;
        Ok(())
    }

    fn register_face_id(&mut self) -> SdkResult<()> {
        self.log.push(Call::RegisterFace);
        Ok(())
    }

    fn clear_face_ids(&mut self) -> SdkResult<()> {
        self.log.push(Call::ClearFaces);
        Ok(())
    }

    fn shutdown(&mut self) -> SdkResult<()> {
        self.log.push(Call::Shutdown);
        if self.fail_shutdown {
            return Err(SdkError::Shutdown("bus busy".to_string()));
        }
        Ok(())
    }
}

/// Config file on disk plus the directory captures go to
pub struct Fixture {
    pub dir: TempDir,
    pub config: EveConfig,
}

impl Fixture {
    /// Face detection on, everything else off
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut config = EveConfig::default();
        config.output.directory = dir.path().join("captures");
        config.features.get_mut(FeatureId::FaceDetection).enabled = true;
        save_config(&config, &dir.path().join("eve_configuration.toml"))
            .expect("Failed to write test config");
        Self { dir, config }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("eve_configuration.toml")
    }

    pub fn image_path(&self) -> PathBuf {
        self.config.output.image_path()
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.config.output.metadata_path()
    }

    pub fn options(&self) -> ConsoleOptions {
        ConsoleOptions {
            stored: self.config.clone(),
            effective: self.config.clone(),
            config_path: self.config_path(),
            save_on_exit: false,
        }
    }

    /// Run a scripted console session; returns everything printed
    pub fn run(&self, backend: MockBackend, script: &str) -> (HarnessResult<()>, String) {
        self.run_with(backend, self.options(), script)
    }

    pub fn run_with(
        &self,
        backend: MockBackend,
        options: ConsoleOptions,
        script: &str,
    ) -> (HarnessResult<()>, String) {
        self.run_input(backend, options, Cursor::new(script.to_string()))
    }

    /// Run against any input source, such as raw bytes or a channel
    pub fn run_input<I: InputSource>(
        &self,
        backend: MockBackend,
        options: ConsoleOptions,
        input: I,
    ) -> (HarnessResult<()>, String) {
        let mut output = Vec::new();
        let result = run_console(backend, options, input, &mut output);
        (result, String::from_utf8_lossy(&output).into_owned())
    }
}
