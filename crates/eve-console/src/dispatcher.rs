// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Command dispatcher
//!
//! Blocking read-eval loop over line-oriented operator input. The active
//! menu is an explicit state; sub-menus are one level deep and `b` returns
//! to the main menu. `x` exits from any menu, as do end of input and an
//! interrupt.
//!
//! Errors from a command are reported to the operator and the loop carries
//! on; only a failure to talk to the terminal ends it early.

use std::io::Write;

use eve_sdk::EveBackend;
use tracing::{debug, info, warn};

use crate::commands::{Command, FaceIdCommand, MainCommand, SettingsCommand};
use crate::error::HarnessResult;
use crate::input::{InputEvent, InputSource};
use crate::menu;
use crate::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Main,
    Settings,
    FaceId,
}

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Dispatcher<I, W> {
    input: I,
    output: W,
    state: MenuState,
}

impl<I: InputSource, W: Write> Dispatcher<I, W> {
    pub fn new(input: I, output: W) -> Self {
        Self {
            input,
            output,
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the operator exits, input ends or an interrupt arrives
    pub fn run<B: EveBackend>(&mut self, session: &mut Session<B>) -> HarnessResult<()> {
        self.show_menu(session)?;
        loop {
            menu::prompt(&mut self.output)?;
            let line = match self.input.next_event()? {
                InputEvent::Line(line) => line,
                InputEvent::Interrupted => {
                    info!("Interrupted, leaving console");
                    writeln!(self.output, "\nInterrupted")?;
                    break;
                }
                InputEvent::Closed => {
                    info!("End of input, leaving console");
                    writeln!(self.output)?;
                    break;
                }
            };

            let input = line.trim().to_lowercase();
            if input.is_empty() {
                continue;
            }
            debug!(menu = ?self.state, input = %input, "Command received");

            match self.dispatch(session, &input) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    warn!("Command '{}' failed: {}", input, e);
                    writeln!(self.output, "❌ {}", e)?;
                }
            }
            self.show_menu(session)?;
        }

        if session.has_unsaved_changes() {
            writeln!(self.output, "Unsaved settings changes discarded")?;
        }
        writeln!(self.output, "👋 Exiting")?;
        Ok(())
    }

    /// Execute one trimmed, lowercased line in the current menu
    pub fn dispatch<B: EveBackend>(
        &mut self,
        session: &mut Session<B>,
        input: &str,
    ) -> HarnessResult<Flow> {
        match self.state {
            MenuState::Main => self.main_command(session, MainCommand::parse(input)?),
            MenuState::Settings => self.settings_command(session, SettingsCommand::parse(input)?),
            MenuState::FaceId => self.face_id_command(session, FaceIdCommand::parse(input)?),
        }
    }

    fn main_command<B: EveBackend>(
        &mut self,
        session: &mut Session<B>,
        command: MainCommand,
    ) -> HarnessResult<Flow> {
        match command {
            MainCommand::Capture(kind) => {
                writeln!(self.output, "Capturing {}...", kind.describe())?;
                let report = session.capture(kind)?;
                menu::capture_report(&mut self.output, kind, &report)?;
            }
            MainCommand::Settings => self.state = MenuState::Settings,
            MainCommand::FaceId => self.state = MenuState::FaceId,
            MainCommand::ToggleUlp => {
                let enabled = session.toggle_ulp()?;
                writeln!(
                    self.output,
                    "ULP mode {}",
                    if enabled { "enabled" } else { "disabled" }
                )?;
            }
            MainCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn settings_command<B: EveBackend>(
        &mut self,
        session: &mut Session<B>,
        command: SettingsCommand,
    ) -> HarnessResult<Flow> {
        match command {
            SettingsCommand::Toggle(feature) => {
                let enabled = session.toggle(feature)?;
                writeln!(
                    self.output,
                    "{} {}",
                    feature.label(),
                    if enabled { "enabled" } else { "disabled" }
                )?;
            }
            SettingsCommand::EnableAll => {
                session.enable_all()?;
                writeln!(self.output, "All features enabled")?;
            }
            SettingsCommand::DisableAll => {
                session.disable_all()?;
                writeln!(self.output, "All features disabled")?;
            }
            SettingsCommand::Reset => {
                session.reset_to_defaults()?;
                writeln!(self.output, "Settings reset to saved defaults")?;
            }
            SettingsCommand::Save => {
                let path = session.save_settings()?;
                writeln!(self.output, "💾 Settings saved to {}", path.display())?;
            }
            SettingsCommand::Back => self.state = MenuState::Main,
            SettingsCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn face_id_command<B: EveBackend>(
        &mut self,
        session: &mut Session<B>,
        command: FaceIdCommand,
    ) -> HarnessResult<Flow> {
        match command {
            FaceIdCommand::Register => {
                session.register_face_id()?;
                writeln!(self.output, "✓ Face registered")?;
            }
            FaceIdCommand::Clear => {
                session.clear_face_ids()?;
                writeln!(self.output, "✓ Registered faces cleared")?;
            }
            FaceIdCommand::Back => self.state = MenuState::Main,
            FaceIdCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn show_menu<B: EveBackend>(&mut self, session: &Session<B>) -> HarnessResult<()> {
        match self.state {
            MenuState::Main => menu::main_menu(&mut self.output, &session.status())?,
            MenuState::Settings => menu::settings_menu(
                &mut self.output,
                &session.features(),
                session.has_unsaved_changes(),
            )?,
            MenuState::FaceId => menu::face_id_menu(&mut self.output, &session.features())?,
        }
        Ok(())
    }
}
