// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Operator commands
//!
//! Every command is a single character. Input reaching these parsers has
//! already been trimmed and lowercased by the dispatcher.

use eve_config::FeatureId;

use crate::capture::CaptureKind;
use crate::error::{HarnessError, HarnessResult};

/// A menu's command set
pub trait Command: Sized {
    fn from_key(key: char) -> Option<Self>;

    /// Parse one line of operator input
    ///
    /// # Errors
    /// `HarnessError::UnrecognizedCommand` unless `input` is exactly one
    /// known key
    fn parse(input: &str) -> HarnessResult<Self> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Self::from_key(key)
                .ok_or_else(|| HarnessError::UnrecognizedCommand(input.to_string())),
            _ => Err(HarnessError::UnrecognizedCommand(input.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Capture(CaptureKind),
    Settings,
    FaceId,
    ToggleUlp,
    Exit,
}

impl Command for MainCommand {
    fn from_key(key: char) -> Option<Self> {
        match key {
            'c' => Some(MainCommand::Capture(CaptureKind::Both)),
            'm' => Some(MainCommand::Capture(CaptureKind::MetadataOnly)),
            'i' => Some(MainCommand::Capture(CaptureKind::ImageOnly)),
            's' => Some(MainCommand::Settings),
            'f' => Some(MainCommand::FaceId),
            'u' => Some(MainCommand::ToggleUlp),
            'x' => Some(MainCommand::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Toggle(FeatureId),
    EnableAll,
    DisableAll,
    Reset,
    Save,
    Back,
    Exit,
}

impl Command for SettingsCommand {
    fn from_key(key: char) -> Option<Self> {
        if let Some(feature) = FeatureId::from_menu_key(key) {
            return Some(SettingsCommand::Toggle(feature));
        }
        match key {
            'a' => Some(SettingsCommand::EnableAll),
            'd' => Some(SettingsCommand::DisableAll),
            'r' => Some(SettingsCommand::Reset),
            's' => Some(SettingsCommand::Save),
            'b' => Some(SettingsCommand::Back),
            'x' => Some(SettingsCommand::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceIdCommand {
    Register,
    Clear,
    Back,
    Exit,
}

impl Command for FaceIdCommand {
    fn from_key(key: char) -> Option<Self> {
        match key {
            'r' => Some(FaceIdCommand::Register),
            'c' => Some(FaceIdCommand::Clear),
            'b' => Some(FaceIdCommand::Back),
            'x' => Some(FaceIdCommand::Exit),
            _ => None,
        }
    }
}
