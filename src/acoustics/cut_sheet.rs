//! Panel cut list.
//!
//! Top and bottom run the full width and depth. The sides sit between them,
//! and front and back sit between the sides. Dimensions are in cm.

use crate::design::{BoxType, BracingType, DesignParams};

use super::geometry::InternalDimensions;
use super::result::PanelCut;

fn cut(name: &str, width: f64, height: f64, count: u32) -> PanelCut {
    PanelCut {
        name: name.to_string(),
        width,
        height,
        count,
    }
}

/// Panels needed to build the cabinet.
pub fn cut_sheet(params: &DesignParams, inner: &InternalDimensions) -> Vec<PanelCut> {
    let t2 = 2.0 * params.thickness_cm();

    let mut cuts = vec![
        cut("Top/Bottom", params.width, params.depth, 2),
        cut("Sides", params.height - t2, params.depth, 2),
        cut("Front/Back", params.width - t2, params.height - t2, 2),
    ];

    if params.box_type == BoxType::Bandpass4th {
        cuts.push(cut("Divider", inner.width, inner.height, 1));
    }

    match params.bracing_type {
        BracingType::None => {}
        BracingType::Window => cuts.push(cut("Window brace", inner.width, inner.depth, 1)),
        BracingType::Cross => cuts.push(cut("Cross brace", inner.width, inner.depth, 2)),
    }

    cuts
}
