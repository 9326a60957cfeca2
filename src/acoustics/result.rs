//! Simulation output types.

use serde::Serialize;

use crate::advisor::Advice;

/// One sample of a curve: frequency (Hz) against a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphPoint {
    pub x: f64,
    pub y: f64,
}

/// An ordered, finite sequence of samples over the frequency sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Curve(Vec<GraphPoint>);

impl Curve {
    /// Samples in sweep order.
    pub fn points(&self) -> &[GraphPoint] {
        &self.0
    }

    /// Iterate over the samples in sweep order.
    pub fn iter(&self) -> std::slice::Iter<'_, GraphPoint> {
        self.0.iter()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the curve has no samples, as in a degenerate result.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sample with the largest value. Ties go to the lowest frequency.
    pub fn max_point(&self) -> Option<GraphPoint> {
        self.0.iter().copied().fold(None, |best, p| match best {
            Some(b) if b.y >= p.y => Some(b),
            _ => Some(p),
        })
    }

    /// Largest value on the curve, or 0 for an empty curve.
    pub fn peak(&self) -> f64 {
        self.max_point().map(|p| p.y).unwrap_or(0.0)
    }
}

impl FromIterator<GraphPoint> for Curve {
    fn from_iter<I: IntoIterator<Item = GraphPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a GraphPoint;
    type IntoIter = std::slice::Iter<'a, GraphPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Volume taken up inside the box (L).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Displacement {
    pub driver: f64,
    pub port: f64,
    pub bracing: f64,
    pub divider: f64,
}

impl Displacement {
    /// Sum of all displaced volume.
    pub fn total(&self) -> f64 {
        self.driver + self.bracing + self.divider + self.port
    }
}

/// A rectangular panel to cut (cm).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelCut {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub count: u32,
}

/// Everything derived from one design snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Internal volume before displacement (L)
    pub gross_volume: f64,
    /// Usable volume (L)
    pub net_total: f64,
    /// Rear/sealed chamber, or the whole box for single-chamber designs (L)
    pub chamber1: f64,
    /// Front/ported chamber of a bandpass box (L)
    pub chamber2: f64,
    pub displacement: Displacement,

    /// Required port length (cm), 0 for sealed boxes
    pub port_length: f64,
    pub is_port_collision: bool,

    /// Physical safety problems
    pub warnings: Vec<String>,
    /// Design advice, filled in after simulation
    pub advice: Vec<Advice>,

    /// Response (dB)
    pub frequency_response: Curve,
    /// Cone excursion (mm)
    pub cone_excursion: Curve,
    /// Port air velocity (m/s)
    pub port_velocity: Curve,

    pub cut_sheet: Vec<PanelCut>,
}

impl SimulationResult {
    /// A zeroed result carrying one diagnostic.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self {
            warnings: vec![message.into()],
            ..Self::default()
        }
    }

    /// True if this is a zeroed result for an impossible design.
    pub fn is_degenerate(&self) -> bool {
        self.gross_volume == 0.0 && self.warnings.len() == 1 && self.cut_sheet.is_empty()
    }
}
