//! Sampled behaviour curves.
//!
//! These are closed-form approximations meant for charts and sanity checks,
//! not a full equivalent-circuit solution. A sealed box is a second-order
//! high-pass. Vented boxes are a fourth-order roll-off below Fb plus a
//! Gaussian bump at Fb, and a bandpass box also falls off above its
//! passband.

use crate::design::BoxType;

use super::{SimulationConfig, EXCURSION_CEILING_MM, MAX_RESPONSE_DB, MIN_RESPONSE_DB};
use super::result::{Curve, GraphPoint};

/// Vented roll-off below tuning (dB per decade).
const VENTED_ROLL_OFF_DB: f64 = 24.0;
/// Height of the tuning bump (dB).
const TUNING_BOOST_DB: f64 = 6.0;
/// Width of the tuning bump (Hz).
const TUNING_BOOST_WIDTH_HZ: f64 = 10.0;
/// Upper edge of a bandpass passband, as a multiple of Fb.
const BANDPASS_UPPER_RATIO: f64 = 2.5;
/// Bandpass roll-off above the passband (dB per decade).
const BANDPASS_UPPER_ROLL_OFF_DB: f64 = 24.0;

/// Excursion per volt-over-hertz, already in display millimeters.
const EXCURSION_COEFF: f64 = 2.5;
/// Excursion multiplier below tuning, where the port stops loading the cone.
const BELOW_TUNING_PENALTY: f64 = 3.0;

/// Width of the port velocity peak (Hz).
const VELOCITY_WIDTH_HZ: f64 = 5.0;

/// Everything the curves need, already sanitized by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub box_type: BoxType,
    /// Driver resonance (Hz)
    pub fs: f64,
    pub qts: f64,
    /// Driver compliance volume (L)
    pub vas: f64,
    /// Cone area (cm²)
    pub sd: f64,
    /// Box volume loading the driver (L)
    pub net_volume: f64,
    /// Port tuning (Hz)
    pub tuning_freq: f64,
    /// Total port area (cm²), 0 for sealed boxes
    pub port_area: f64,
}

impl Alignment {
    /// Compliance ratio Vas / Vb.
    pub fn alpha(&self) -> f64 {
        self.vas / self.net_volume
    }

    /// Closed-box resonance (Hz).
    pub fn fc(&self) -> f64 {
        self.fs * (1.0 + self.alpha()).sqrt()
    }

    /// Closed-box total Q.
    pub fn qtc(&self) -> f64 {
        self.qts * (1.0 + self.alpha()).sqrt()
    }
}

fn sample(config: &SimulationConfig, f: impl Fn(f64) -> f64) -> Curve {
    config
        .frequencies()
        .map(|x| GraphPoint { x, y: f(x) })
        .collect()
}

fn gaussian(x: f64, center: f64, width: f64) -> f64 {
    (-((x - center) / width).powi(2)).exp()
}

/// Predicted response (dB, 0 dB = passband).
pub fn frequency_response(a: &Alignment, config: &SimulationConfig) -> Curve {
    let fc = a.fc();
    let qtc = a.qtc();
    let fb = a.tuning_freq;

    sample(config, |f| {
        let db = match a.box_type {
            BoxType::Sealed => {
                let r2 = (f / fc).powi(2);
                let mag = r2 / ((1.0 - r2).powi(2) + r2 / (qtc * qtc)).sqrt();
                20.0 * mag.log10()
            }
            BoxType::Ported | BoxType::Bandpass4th => {
                let mut db = TUNING_BOOST_DB * gaussian(f, fb, TUNING_BOOST_WIDTH_HZ);
                if f < fb {
                    db += VENTED_ROLL_OFF_DB * (f / fb).log10();
                }
                let upper = fb * BANDPASS_UPPER_RATIO;
                if a.box_type == BoxType::Bandpass4th && f > upper {
                    db -= BANDPASS_UPPER_ROLL_OFF_DB * (f / upper).log10();
                }
                db
            }
        };
        db.clamp(MIN_RESPONSE_DB, MAX_RESPONSE_DB)
    })
}

/// Predicted cone excursion at the configured drive power (mm).
pub fn cone_excursion(a: &Alignment, config: &SimulationConfig) -> Curve {
    let volts = config.drive_voltage();
    let fc = a.fc();
    let fb = a.tuning_freq;

    sample(config, |f| {
        let base = EXCURSION_COEFF * volts / f;
        let mm = match a.box_type {
            BoxType::Sealed => base / (1.0 + (f / fc).powi(2)),
            BoxType::Ported | BoxType::Bandpass4th => {
                if f < fb {
                    base * BELOW_TUNING_PENALTY
                } else {
                    // the port takes over and the cone nearly stops at Fb
                    base * (f - fb) / fb
                }
            }
        };
        mm.min(EXCURSION_CEILING_MM)
    })
}

/// Predicted air speed in the port (m/s). Zero everywhere for sealed boxes.
pub fn port_velocity(a: &Alignment, config: &SimulationConfig) -> Curve {
    let vented = a.box_type.is_vented() && a.port_area > 0.0;
    let scale = if vented {
        (a.sd / a.port_area) * config.drive_power.sqrt() / 2.0
    } else {
        0.0
    };

    sample(config, |f| {
        if vented {
            scale * gaussian(f, a.tuning_freq, VELOCITY_WIDTH_HZ)
        } else {
            0.0
        }
    })
}
