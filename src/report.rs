//! Report rendering for the CLI frontend.
//!
//! Writes a design and its result as plain text or JSON.

use std::io::Write;

use crate::acoustics::{SimulationResult, PORT_NOISE_VELOCITY_MS};
use crate::design::DesignParams;
use crate::error::{EnclosureError, Result};
use crate::store::DesignSnapshot;

fn io_err(e: std::io::Error) -> EnclosureError {
    EnclosureError::output(e.to_string())
}

/// Write a human-readable report.
pub fn write_text<W: Write>(out: &mut W, params: &DesignParams, result: &SimulationResult) -> Result<()> {
    write_summary(out, params, result).map_err(io_err)
}

fn write_summary<W: Write>(out: &mut W, p: &DesignParams, r: &SimulationResult) -> std::io::Result<()> {
    writeln!(
        out,
        "Design: {} / {}, {} box, {} bracing",
        p.application, p.speaker_type, p.box_type, p.bracing_type
    )?;
    writeln!(
        out,
        "Cabinet: {} x {} x {} cm, {} mm panels",
        p.width, p.height, p.depth, p.thickness
    )?;
    writeln!(
        out,
        "Driver: {} (Fs {} Hz, Qts {}, Vas {} L, Xmax {} mm, Sd {} cm²)",
        p.driver.name, p.driver.fs, p.driver.qts, p.driver.vas, p.driver.xmax, p.driver.sd
    )?;
    writeln!(out)?;

    writeln!(out, "Volumes")?;
    writeln!(out, "  gross       {:>8.2} L", r.gross_volume)?;
    writeln!(out, "  driver      {:>8.2} L", -r.displacement.driver)?;
    writeln!(out, "  bracing     {:>8.2} L", -r.displacement.bracing)?;
    writeln!(out, "  divider     {:>8.2} L", -r.displacement.divider)?;
    writeln!(out, "  port        {:>8.2} L", -r.displacement.port)?;
    writeln!(out, "  net         {:>8.2} L", r.net_total)?;
    if r.chamber2 > 0.0 {
        writeln!(out, "  rear        {:>8.2} L", r.chamber1)?;
        writeln!(out, "  front       {:>8.2} L", r.chamber2)?;
    }

    if p.box_type.is_vented() && !r.is_degenerate() {
        writeln!(out)?;
        writeln!(
            out,
            "Port: {} x{}, tuned to {} Hz, length {:.1} cm{}",
            p.port.port_type,
            p.port.count,
            p.port.tuning_freq,
            r.port_length,
            if r.is_port_collision { " (COLLISION)" } else { "" }
        )?;
    }

    if let (Some(exc), Some(vel)) = (r.cone_excursion.max_point(), r.port_velocity.max_point()) {
        writeln!(out)?;
        writeln!(out, "Peak excursion: {:.1} mm at {} Hz (Xmax {} mm)", exc.y, exc.x, p.driver.xmax)?;
        if p.box_type.is_vented() {
            writeln!(
                out,
                "Peak port velocity: {:.1} m/s at {} Hz (limit {} m/s)",
                vel.y, vel.x, PORT_NOISE_VELOCITY_MS
            )?;
        }
    }

    if !r.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings")?;
        for w in &r.warnings {
            writeln!(out, "  ! {w}")?;
        }
    }

    if !r.advice.is_empty() {
        writeln!(out)?;
        writeln!(out, "Advice")?;
        for a in &r.advice {
            writeln!(out, "  [{}] {}", a.level, a.message)?;
        }
    }

    if r.warnings.is_empty() && r.advice.is_empty() {
        writeln!(out)?;
        writeln!(out, "No issues found.")?;
    }

    if !r.cut_sheet.is_empty() {
        writeln!(out)?;
        writeln!(out, "Cut sheet")?;
        for c in &r.cut_sheet {
            writeln!(out, "  {:<14} {:>7.1} x {:>7.1} cm  x{}", c.name, c.width, c.height, c.count)?;
        }
    }

    Ok(())
}

/// Write the design and result as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, snapshot: &DesignSnapshot) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, snapshot).map_err(|e| EnclosureError::output(e.to_string()))?;
    writeln!(out).map_err(io_err)
}
