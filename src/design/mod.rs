//! Enclosure design description.
//!
//! [`DesignParams`] is everything the user edits: context, cabinet
//! geometry, topology, driver and port. Designs are exchanged as JSON with
//! camelCase field names and the lowercase enum tags used by the UI:
//!
//! ```text
//! {
//!   "application": "car_audio",
//!   "speakerType": "subwoofer_box",
//!   "width": 45, "height": 60, "depth": 40, "thickness": 18,
//!   "boxType": "ported",
//!   "bracingType": "window",
//!   "driver": { "name": "Generic 12\"", "fs": 34, "qts": 0.45, "vas": 56, "xmax": 12, "sd": 510 },
//!   "port": { "type": "aero", "tuningFreq": 36, "diameter": 10, "count": 1 },
//!   "chamberRatio": 0.5
//! }
//! ```
//!
//! Any field left out keeps the value of the initial design.

mod patch;
mod presets;
mod types;

pub use patch::{DesignPatch, DriverPatch, PortPatch};
pub use presets::{apply_project_context, speaker_preset, SpeakerPreset};
pub use types::*;

use crate::error::Result;

/// Parse a design from a JSON string.
pub fn from_json(input: &str) -> Result<DesignParams> {
    Ok(serde_json::from_str(input)?)
}

/// Load a design file.
#[cfg(feature = "cli")]
pub fn load_file(path: &std::path::Path) -> Result<DesignParams> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::EnclosureError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let params = from_json(&content)?;
    log::info!("loaded design from {}", path.display());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnclosureError;

    #[test]
    fn test_from_json() {
        let p = from_json(r#"{"width": 30, "boxType": "bandpass4", "chamberRatio": 0.6}"#).unwrap();
        assert_eq!(p.width, 30.0);
        assert_eq!(p.box_type, BoxType::Bandpass4th);
        assert_eq!(p.chamber_ratio, 0.6);
    }

    #[test]
    fn test_from_json_rejects_bad_tags() {
        let err = from_json(r#"{"boxType": "transmission_line"}"#).unwrap_err();
        assert!(matches!(err, EnclosureError::InvalidDesign { .. }));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_load_missing_file() {
        let err = load_file(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EnclosureError::FileReadError { .. }));
    }
}
