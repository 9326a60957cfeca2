//! Helmholtz port sizing.

use std::f64::consts::PI;

use crate::design::{PortParams, PortType};

use super::{MIN_PORT_AREA_CM2, MIN_PORT_LENGTH_CM, SPEED_OF_SOUND_CM_S};

/// End-correction coefficient, multiplied by √Av.
///
/// Flared mouths add the most acoustic mass.
pub fn end_correction(port_type: PortType) -> f64 {
    match port_type {
        PortType::Circular => 0.732,
        PortType::Slot => 0.825,
        PortType::AeroFlare => 0.95,
    }
}

/// Multiplier from the air column volume to the displaced volume, covering
/// the port walls.
pub fn wall_factor(port_type: PortType) -> f64 {
    match port_type {
        PortType::Circular => 1.2,
        // slot walls are panel stock
        PortType::Slot => 1.35,
        PortType::AeroFlare => 1.15,
    }
}

/// Total cross-sectional area of all ports (cm²).
///
/// Negative or non-finite dimensions count as zero; count is at least one.
/// A total below [`MIN_PORT_AREA_CM2`], or one too large to represent, is a
/// closed port and reads as zero.
pub fn port_area(port: &PortParams) -> f64 {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let single = match port.port_type {
        PortType::Slot => clean(port.width) * clean(port.height),
        PortType::Circular | PortType::AeroFlare => PI * (clean(port.diameter) / 2.0).powi(2),
    };
    let total = single * port.count.max(1) as f64;
    if total.is_finite() && total >= MIN_PORT_AREA_CM2 {
        total
    } else {
        0.0
    }
}

/// Port length (cm) tuning `volume` liters to `tuning_freq` Hz.
///
/// Never shorter than [`MIN_PORT_LENGTH_CM`]. Callers pass a positive
/// volume and frequency.
pub fn port_length(port_type: PortType, area: f64, tuning_freq: f64, volume: f64) -> f64 {
    let mass_term = SPEED_OF_SOUND_CM_S.powi(2) * area;
    let stiffness_term = 4.0 * PI * PI * tuning_freq.powi(2) * volume * 1000.0;
    let length = mass_term / stiffness_term - end_correction(port_type) * area.sqrt();
    length.max(MIN_PORT_LENGTH_CM)
}

/// Volume displaced by the ports (L).
pub fn port_displacement(port_type: PortType, area: f64, length: f64) -> f64 {
    area * length * wall_factor(port_type) / 1000.0
}
