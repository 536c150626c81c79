// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Menu and result rendering

use std::io::{self, Write};

use eve_config::{FeatureFlags, FeatureId};
use eve_sdk::DeviceStatus;

use crate::capture::{CaptureKind, CaptureOutcome, CaptureReport, SaveStatus};

const RULE: &str = "──────────────────────────────────────────";

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "╔════════════════════════════════════════╗")?;
    writeln!(out, "║   EVE Console v{:<24}║", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "║   Camera / sensor SDK test harness     ║")?;
    writeln!(out, "╚════════════════════════════════════════╝")
}

pub fn main_menu(out: &mut impl Write, status: &DeviceStatus) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "📷 Main menu")?;
    writeln!(out, "  c  Capture image + metadata")?;
    writeln!(out, "  m  Capture metadata only")?;
    writeln!(out, "  i  Capture image only")?;
    writeln!(out, "  s  Settings")?;
    writeln!(out, "  f  Face ID")?;
    writeln!(out, "  u  Toggle ULP mode")?;
    writeln!(out, "  x  Exit")?;
    writeln!(
        out,
        "  [frame {} | FPGA {} | metadata camera {} | ULP {}]",
        status.frame_id,
        on_off(status.fpga_enabled),
        on_off(status.metadata_camera),
        on_off(status.ulp_enabled)
    )?;
    writeln!(out, "{}", RULE)
}

pub fn settings_menu(out: &mut impl Write, flags: &FeatureFlags, unsaved: bool) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "⚙️  Settings{}", if unsaved { " (unsaved changes)" } else { "" })?;
    for feature in FeatureId::ALL {
        writeln!(
            out,
            "  {}  [{}] {}",
            feature.menu_key(),
            if flags.get(feature) { "x" } else { " " },
            feature.label()
        )?;
    }
    writeln!(out, "  a  Enable all")?;
    writeln!(out, "  d  Disable all")?;
    writeln!(out, "  r  Reset to saved defaults")?;
    writeln!(out, "  s  Save settings")?;
    writeln!(out, "  b  Back")?;
    writeln!(out, "  x  Exit")?;
    writeln!(out, "{}", RULE)
}

pub fn face_id_menu(out: &mut impl Write, flags: &FeatureFlags) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "🙂 Face ID")?;
    if !(flags.get(FeatureId::FaceId) || flags.get(FeatureId::FaceIdMulti)) {
        writeln!(out, "  (Face ID is disabled; enable it in Settings)")?;
    }
    writeln!(out, "  r  Register face")?;
    writeln!(out, "  c  Clear registered faces")?;
    writeln!(out, "  b  Back")?;
    writeln!(out, "  x  Exit")?;
    writeln!(out, "{}", RULE)
}

pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

pub fn capture_report(
    out: &mut impl Write,
    kind: CaptureKind,
    report: &CaptureReport,
) -> io::Result<()> {
    part(out, "Metadata", &report.metadata)?;
    part(out, "Image", &report.image)?;
    match report.outcome() {
        CaptureOutcome::Complete => writeln!(
            out,
            "✅ Captured {} (frame {})",
            kind.describe(),
            report.frame_id
        ),
        CaptureOutcome::Partial => writeln!(
            out,
            "⚠️  Partial capture of {} (frame {})",
            kind.describe(),
            report.frame_id
        ),
        CaptureOutcome::Failed => writeln!(out, "❌ Capture of {} failed", kind.describe()),
    }
}

fn part(out: &mut impl Write, name: &str, status: &SaveStatus) -> io::Result<()> {
    match status {
        SaveStatus::NotRequested => Ok(()),
        SaveStatus::Saved(path) => writeln!(out, "  ✓ {} saved to {}", name, path.display()),
        SaveStatus::Unavailable => writeln!(out, "  - {} not available", name),
        SaveStatus::Failed(e) => writeln!(out, "  ✗ {}", e),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
