//! Lumped-parameter enclosure simulation.
//!
//! [`calculate`] turns a [`DesignParams`](crate::design::DesignParams)
//! snapshot into a [`SimulationResult`]. It is a pure function: the same
//! design always yields the same result and nothing is cached.
//!
//! ## Pipeline
//!
//! 1. Internal dimensions: external size minus two panel thicknesses
//! 2. Gross volume, then displacement of driver, bracing, divider and port
//! 3. Port length from the Helmholtz relation (vented boxes only)
//! ```text
//!        c² · Av
//! L = ─────────────── − k · √Av
//!     4π² · Fb² · Vb
//! ```
//!    where `k` is the end correction of the port type
//! 4. Frequency response, cone excursion and port air velocity sampled over a
//!    fixed sweep
//! 5. Safety warnings and the cut sheet
//!
//! Physically impossible geometry does not raise an error. The result comes
//! back zeroed with a single warning explaining why, so an interactive
//! caller can keep editing.

mod curves;
mod cut_sheet;
mod engine;
mod geometry;
mod port;
mod result;

pub use curves::{cone_excursion, frequency_response, port_velocity, Alignment};
pub use cut_sheet::cut_sheet;
pub use engine::{calculate, calculate_with};
pub use geometry::InternalDimensions;
pub use port::{end_correction, port_area, port_length, wall_factor};
pub use result::{Curve, Displacement, GraphPoint, PanelCut, SimulationResult};

use crate::error::{EnclosureError, Result};

/// Speed of sound in air (cm/s).
pub const SPEED_OF_SOUND_CM_S: f64 = 34_400.0;

/// Free space kept behind a port's inner mouth (cm).
pub const PORT_CLEARANCE_CM: f64 = 5.0;

/// Port air velocity above which chuffing becomes audible (m/s).
pub const PORT_NOISE_VELOCITY_MS: f64 = 30.0;

/// Shortest port the engine will report (cm).
pub const MIN_PORT_LENGTH_CM: f64 = 1.0;

/// Smallest total port area still treated as an open port (cm²).
pub const MIN_PORT_AREA_CM2: f64 = 0.01;

/// Response ceiling, standing in for power compression (dB).
pub const MAX_RESPONSE_DB: f64 = 12.0;

/// Response floor, keeps the deep stopband finite (dB).
pub const MIN_RESPONSE_DB: f64 = -60.0;

/// Display ceiling for cone excursion (mm).
pub const EXCURSION_CEILING_MM: f64 = 40.0;

/// Upper bound on sweep length.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Tunable drive and sweep settings of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Reference amplifier power (W).
    pub drive_power: f64,
    /// Nominal driver impedance (ohm).
    pub impedance: f64,
    /// First swept frequency (Hz).
    pub sweep_start: f64,
    /// Last swept frequency, inclusive (Hz).
    pub sweep_end: f64,
    /// Sweep increment (Hz).
    pub sweep_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drive_power: 500.0,
            impedance: 4.0,
            sweep_start: 10.0,
            sweep_end: 150.0,
            sweep_step: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference amplifier power (W).
    pub fn with_drive_power(mut self, watts: f64) -> Self {
        self.drive_power = watts;
        self
    }

    /// Set the nominal impedance (ohm).
    pub fn with_impedance(mut self, ohms: f64) -> Self {
        self.impedance = ohms;
        self
    }

    /// Set the frequency sweep.
    pub fn with_sweep(mut self, start: f64, end: f64, step: f64) -> Self {
        self.sweep_start = start;
        self.sweep_end = end;
        self.sweep_step = step;
        self
    }

    /// Drive voltage implied by power into the nominal impedance.
    pub fn drive_voltage(&self) -> f64 {
        (self.drive_power * self.impedance).sqrt()
    }

    /// Number of sweep points.
    pub fn sweep_len(&self) -> usize {
        ((self.sweep_end - self.sweep_start) / self.sweep_step).floor() as usize + 1
    }

    /// Iterate over the swept frequencies.
    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sweep_len()).map(move |i| self.sweep_start + i as f64 * self.sweep_step)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(EnclosureError::invalid_config(format!(
                    "{name} must be a positive number, got {v}"
                )))
            }
        };
        positive("drive power", self.drive_power)?;
        positive("impedance", self.impedance)?;
        positive("sweep start", self.sweep_start)?;
        positive("sweep step", self.sweep_step)?;
        positive("sweep end", self.sweep_end)?;

        if self.sweep_end < self.sweep_start {
            return Err(EnclosureError::invalid_config(format!(
                "sweep end ({} Hz) is below sweep start ({} Hz)",
                self.sweep_end, self.sweep_start
            )));
        }

        let points = (self.sweep_end - self.sweep_start) / self.sweep_step + 1.0;
        if points > MAX_SWEEP_POINTS as f64 {
            return Err(EnclosureError::invalid_config(format!(
                "sweep has {} points, limit is {MAX_SWEEP_POINTS}",
                points.floor()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sweep_len(), 141);

        let freqs: Vec<f64> = config.frequencies().collect();
        assert_eq!(freqs.first(), Some(&10.0));
        assert_eq!(freqs.last(), Some(&150.0));
    }

    #[test]
    fn test_drive_voltage() {
        let config = SimulationConfig::new().with_drive_power(100.0).with_impedance(4.0);
        assert!((config.drive_voltage() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_configs() {
        let inverted = SimulationConfig::new().with_sweep(100.0, 20.0, 1.0);
        assert!(inverted.validate().is_err());

        let zero_step = SimulationConfig::new().with_sweep(10.0, 150.0, 0.0);
        assert!(zero_step.validate().is_err());

        let too_fine = SimulationConfig::new().with_sweep(10.0, 150.0, 0.001);
        assert!(too_fine.validate().is_err());

        let nan_power = SimulationConfig::new().with_drive_power(f64::NAN);
        assert!(nan_power.validate().is_err());
    }
}
