// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Operator input
//!
//! The dispatcher pulls [`InputEvent`]s rather than raw lines so an
//! interrupt can reach it while a read is blocked. Any `BufRead` is an
//! input source; the binary instead reads stdin on its own thread and
//! feeds a channel that the Ctrl+C handler also writes to.

use std::io::{self, BufRead};
use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line of input, undecodable bytes replaced with U+FFFD
    Line(String),
    /// Operator pressed Ctrl+C
    Interrupted,
    /// Input ended
    Closed,
}

pub trait InputSource {
    /// Block until the next event
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

impl<R: BufRead> InputSource for R {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        let mut buf = Vec::new();
        if self.read_until(b'\n', &mut buf)? == 0 {
            return Ok(InputEvent::Closed);
        }
        Ok(InputEvent::Line(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Events delivered over a channel
pub struct ChannelInput {
    rx: Receiver<InputEvent>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        // Every sender gone means nothing more can arrive
        Ok(self.rx.recv().unwrap_or(InputEvent::Closed))
    }
}

/// Forward events from `source` into `tx` until input closes or the
/// receiver is dropped
///
/// A read error is logged and treated as end of input.
pub fn forward_lines<S: InputSource>(mut source: S, tx: Sender<InputEvent>) {
    loop {
        let event = match source.next_event() {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to read operator input: {}", e);
                InputEvent::Closed
            }
        };
        let closed = event == InputEvent::Closed;
        if tx.send(event).is_err() || closed {
            break;
        }
    }
    debug!("Input reader finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut input = Cursor::new(vec![0xFF, 0xFE, b'\n', b'c', b'\n']);
        assert_eq!(
            input.next_event().unwrap(),
            InputEvent::Line("\u{FFFD}\u{FFFD}\n".to_string())
        );
        assert_eq!(input.next_event().unwrap(), InputEvent::Line("c\n".to_string()));
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut input = "x".as_bytes();
        assert_eq!(input.next_event().unwrap(), InputEvent::Line("x".to_string()));
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
    }

    #[test]
    fn test_forward_lines_ends_with_closed() {
        let (tx, rx) = mpsc::channel();
        forward_lines(Cursor::new("s\nb\n"), tx);

        let events: Vec<InputEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Line("s\n".to_string()),
                InputEvent::Line("b\n".to_string()),
                InputEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_channel_input_closed_when_senders_dropped() {
        let (tx, rx) = mpsc::channel();
        let mut input = ChannelInput::new(rx);
        tx.send(InputEvent::Interrupted).unwrap();
        drop(tx);

        assert_eq!(input.next_event().unwrap(), InputEvent::Interrupted);
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
    }
}
