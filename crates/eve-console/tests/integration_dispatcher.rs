//! Integration tests for the command loop
//!
//! Each test scripts operator input over a `Cursor` (or a channel, for
//! interrupts), runs the full console against a recording mock backend and
//! checks the calls, the printed output and the files left on disk.

mod common;

use std::io::Cursor;
use std::sync::mpsc;

use common::{Call, Fixture, MockBackend};
use eve_config::{load_config, FeatureFlags, FeatureId};
use eve_console::{ChannelInput, HarnessError, InputEvent};
use eve_sdk::{CaptureRequest, FeatureState, SdkError};

#[cfg(test)]
mod exit_tests {
    use super::*;

    #[test]
    fn test_exit_from_main_menu() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "x\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
        assert_eq!(log.calls().last(), Some(&Call::Shutdown));
        assert!(output.contains("Exiting"));
    }

    #[test]
    fn test_exit_from_settings_discards_edits() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "s\n2\nx\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
        assert!(output.contains("Unsaved settings changes discarded"));
        let on_disk = load_config(&fixture.config_path()).unwrap();
        assert_eq!(on_disk.features.flags(), fixture.config.features.flags());
    }

    #[test]
    fn test_exit_from_face_id_menu() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, _) = fixture.run(backend, "f\nx\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
    }

    #[test]
    fn test_end_of_input_exits() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, _) = fixture.run(backend, "s\n1\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
    }

    #[test]
    fn test_shutdown_failure_still_exits_cleanly() {
        let fixture = Fixture::new();
        let (mut backend, log) = MockBackend::new();
        backend.fail_shutdown = true;

        let (result, output) = fixture.run(backend, "x\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
        assert!(output.contains("Exiting"));
        assert!(output.contains("SDK cleanup warning: "));
        assert!(output.contains("bus busy"));
    }

    #[test]
    fn test_init_failure_is_fatal_without_shutdown() {
        let fixture = Fixture::new();
        let (mut backend, log) = MockBackend::new();
        backend.fail_init = true;

        let (result, output) = fixture.run(backend, "x\n");

        assert!(matches!(
            result,
            Err(HarnessError::Sdk(SdkError::Init(_)))
        ));
        assert_eq!(log.calls(), vec![Call::Initialize]);
        assert!(output.is_empty());
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn test_unrecognized_input_is_reported() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "z\ncc\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Unknown command: 'z'"));
        assert!(output.contains("Unknown command: 'cc'"));
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 0);
    }

    #[test]
    fn test_invalid_utf8_line_is_unrecognized() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();
        let mut bytes = vec![0xFF, 0xFE, b'\n'];
        bytes.extend_from_slice(b"c\nx\n");

        let (result, output) = fixture.run_input(backend, fixture.options(), Cursor::new(bytes));

        assert!(result.is_ok());
        assert!(output.contains("Unknown command"));
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 1);
        assert_eq!(log.count(&Call::Shutdown), 1);
        assert!(fixture.image_path().exists());
    }

    #[test]
    fn test_blank_lines_and_case() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "\n   \n  C \nX\n");

        assert!(result.is_ok());
        assert!(!output.contains("Unknown command"));
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 1);
    }

    #[test]
    fn test_back_returns_to_main_menu() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        // 'c' is not a settings command, so it only captures after 'b'
        let (result, output) = fixture.run(backend, "s\nc\nb\nc\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Unknown command: 'c'"));
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 1);
    }
}

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[test]
    fn test_capture_writes_both_files() {
        let fixture = Fixture::new();
        let (backend, _log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "c\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Captured frame (image + metadata) (frame 1)"));
        assert_eq!(
            std::fs::read(fixture.image_path()).unwrap(),
            vec![0xFF, 0xD8, 0xFF, 0xD9]
        );
        let metadata: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(fixture.metadata_path()).unwrap())
                .unwrap();
        assert_eq!(metadata["frame_id"], 1);
    }

    #[test]
    fn test_single_part_captures() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, _) = fixture.run(backend, "m\ni\nx\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Capture(CaptureRequest::METADATA_ONLY)), 1);
        assert_eq!(log.count(&Call::Capture(CaptureRequest::IMAGE_ONLY)), 1);
        assert!(fixture.image_path().exists());
        assert!(fixture.metadata_path().exists());
    }

    #[test]
    fn test_capture_failure_writes_nothing() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::failing_capture();

        let (result, output) = fixture.run(backend, "c\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Capture failed: sensor timeout"));
        // Menu shown at start, again after the failure
        assert_eq!(output.matches("Main menu").count(), 2);
        assert!(!fixture.image_path().exists());
        assert!(!fixture.metadata_path().exists());
        assert_eq!(log.count(&Call::Shutdown), 1);
    }

    #[test]
    fn test_capture_failure_keeps_previous_files() {
        let fixture = Fixture::new();
        let (backend, _) = MockBackend::new();
        fixture.run(backend, "c\nx\n").0.unwrap();
        let before = std::fs::read(fixture.metadata_path()).unwrap();

        let (backend, _) = MockBackend::failing_capture();
        fixture.run(backend, "c\nx\n").0.unwrap();

        assert_eq!(std::fs::read(fixture.metadata_path()).unwrap(), before);
    }

    #[test]
    fn test_missing_image_is_partial() {
        let fixture = Fixture::new();
        let (mut backend, _) = MockBackend::new();
        backend.image = false;

        let (result, output) = fixture.run(backend, "c\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Image not available"));
        assert!(output.contains("Partial capture"));
        assert!(fixture.metadata_path().exists());
        assert!(!fixture.image_path().exists());
    }
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn test_toggle_and_save() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "s\n2\ns\nb\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Person Detection enabled"));
        assert!(output.contains("Settings saved to"));

        let saved = load_config(&fixture.config_path()).unwrap().features.flags();
        assert!(saved.get(FeatureId::FaceDetection));
        assert!(saved.get(FeatureId::PersonDetection));
        assert_eq!(saved.enabled_count(), 2);
        assert_eq!(log.last_configured(), Some(saved));
    }

    #[test]
    fn test_every_change_is_applied_to_device() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        fixture.run(backend, "s\na\nd\nx\n").0.unwrap();

        let configured: Vec<FeatureFlags> = log
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Configure(flags) => Some(flags),
                _ => None,
            })
            .collect();
        assert_eq!(
            configured,
            vec![
                fixture.config.features.flags(),
                FeatureFlags::all(true),
                FeatureFlags::all(false),
            ]
        );
    }

    #[test]
    fn test_reset_restores_stored_flags() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        fixture.run(backend, "s\na\nr\nx\n").0.unwrap();

        assert_eq!(log.last_configured(), Some(fixture.config.features.flags()));
    }

    #[test]
    fn test_reset_after_save_uses_saved_flags() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        fixture.run(backend, "s\n6\ns\nd\nr\nx\n").0.unwrap();

        let flags = log.last_configured().unwrap();
        assert!(flags.get(FeatureId::ObjectDetection));
        assert!(flags.get(FeatureId::FaceDetection));
    }

    #[test]
    fn test_save_on_exit() {
        let fixture = Fixture::new();
        let (backend, _) = MockBackend::new();
        let mut options = fixture.options();
        options.save_on_exit = true;

        fixture.run_with(backend, options, "s\n3\nx\n").0.unwrap();

        let saved = load_config(&fixture.config_path()).unwrap().features.flags();
        assert!(saved.get(FeatureId::HandLandmarks));
    }

    #[test]
    fn test_device_readback_wins() {
        let fixture = Fixture::new();
        let (mut backend, _) = MockBackend::new();
        backend.readback = Some(vec![FeatureState {
            feature: FeatureId::FaceId,
            enabled: false,
            max_ips: Some(8),
        }]);

        let (result, output) = fixture.run(backend, "s\n4\ns\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("Face ID disabled"));
        let saved = load_config(&fixture.config_path()).unwrap().features;
        assert!(!saved.get(FeatureId::FaceId).enabled);
        assert_eq!(saved.get(FeatureId::FaceId).max_ips, Some(8));
    }
}

#[cfg(test)]
mod device_tests {
    use super::*;

    #[test]
    fn test_face_id_menu() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, _) = fixture.run(backend, "f\nr\nr\nc\nb\nx\n");

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::RegisterFace), 2);
        assert_eq!(log.count(&Call::ClearFaces), 1);
    }

    #[test]
    fn test_ulp_toggles() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, output) = fixture.run(backend, "u\nu\nx\n");

        assert!(result.is_ok());
        assert!(output.contains("ULP mode enabled"));
        assert!(output.contains("ULP mode disabled"));
        assert_eq!(log.count(&Call::SetUlp(true)), 1);
        assert_eq!(log.count(&Call::SetUlp(false)), 1);
    }
}

#[cfg(test)]
mod interrupt_tests {
    use super::*;

    fn lines(script: &[&str]) -> Vec<InputEvent> {
        script.iter().map(|l| InputEvent::Line(l.to_string())).collect()
    }

    fn channel_with(events: Vec<InputEvent>) -> ChannelInput {
        let (tx, rx) = mpsc::channel();
        for event in events {
            tx.send(event).unwrap();
        }
        ChannelInput::new(rx)
    }

    #[test]
    fn test_interrupt_in_settings_shuts_down() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();
        let mut events = lines(&["s\n", "2\n"]);
        events.push(InputEvent::Interrupted);
        events.extend(lines(&["b\n", "c\n"]));

        let (result, output) = fixture.run_input(backend, fixture.options(), channel_with(events));

        assert!(result.is_ok());
        assert!(output.contains("Interrupted"));
        assert!(output.contains("Unsaved settings changes discarded"));
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 0);
        assert_eq!(log.count(&Call::Shutdown), 1);
        assert_eq!(log.calls().last(), Some(&Call::Shutdown));
    }

    #[test]
    fn test_interrupt_saves_on_exit() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();
        let mut options = fixture.options();
        options.save_on_exit = true;
        let mut events = lines(&["s\n", "3\n"]);
        events.push(InputEvent::Interrupted);

        let (result, _) = fixture.run_input(backend, options, channel_with(events));

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Shutdown), 1);
        let saved = load_config(&fixture.config_path()).unwrap().features.flags();
        assert!(saved.get(FeatureId::HandLandmarks));
    }

    #[test]
    fn test_closed_channel_ends_session() {
        let fixture = Fixture::new();
        let (backend, log) = MockBackend::new();

        let (result, _) =
            fixture.run_input(backend, fixture.options(), channel_with(lines(&["c\n"])));

        assert!(result.is_ok());
        assert_eq!(log.count(&Call::Capture(CaptureRequest::BOTH)), 1);
        assert_eq!(log.count(&Call::Shutdown), 1);
    }
}
