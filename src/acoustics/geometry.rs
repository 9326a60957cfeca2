//! Cabinet geometry and displaced volume.

use crate::design::{BoxType, BracingType, DesignParams};

/// Assumed cone depth used to estimate driver displacement (cm).
pub const CONE_DEPTH_CM: f64 = 20.0;

/// Share of the cone "cylinder" the driver basket actually fills.
pub const DRIVER_FILL_FRACTION: f64 = 0.4;

/// Share of gross volume taken by internal bracing.
pub const BRACING_FRACTION: f64 = 0.06;

/// Internal dimensions of the cabinet (cm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl InternalDimensions {
    /// Subtract two panel thicknesses from every external dimension.
    ///
    /// Returns a diagnostic if the panels are not positive or leave no
    /// room inside.
    pub fn from_params(params: &DesignParams) -> Result<Self, String> {
        let t = params.thickness_cm();
        if !(t.is_finite() && t > 0.0) {
            return Err(format!(
                "Invalid geometry: panel thickness must be positive (got {} mm).",
                params.thickness
            ));
        }

        let dims = Self {
            width: params.width - 2.0 * t,
            height: params.height - 2.0 * t,
            depth: params.depth - 2.0 * t,
        };

        for (label, value) in [
            ("width", dims.width),
            ("height", dims.height),
            ("depth", dims.depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!(
                    "Invalid geometry: internal {label} is {value:.1} cm. \
                     The panels are thicker than the box."
                ));
            }
        }

        Ok(dims)
    }

    /// Gross internal volume (L).
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth / 1000.0
    }
}

/// Volume taken by the driver (L), from cone area (cm²).
pub fn driver_displacement(sd: f64) -> f64 {
    sd * CONE_DEPTH_CM / 1000.0 * DRIVER_FILL_FRACTION
}

/// Volume taken by internal bracing (L).
pub fn bracing_displacement(bracing: BracingType, gross: f64) -> f64 {
    match bracing {
        BracingType::None => 0.0,
        BracingType::Window | BracingType::Cross => gross * BRACING_FRACTION,
    }
}

/// Volume taken by the bandpass chamber divider (L).
pub fn divider_displacement(box_type: BoxType, dims: &InternalDimensions, thickness_cm: f64) -> f64 {
    match box_type {
        BoxType::Bandpass4th => dims.width * dims.height * thickness_cm / 1000.0,
        BoxType::Sealed | BoxType::Ported => 0.0,
    }
}
