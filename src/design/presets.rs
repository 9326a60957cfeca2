//! Project-context presets.
//!
//! Picking an application and a speaker format resets the cabinet to a
//! sensible starting point. Format presets come first, then the application
//! may override construction details.

use super::types::*;

/// Starting dimensions and tuning for a speaker format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeakerPreset {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Nominal driver size in inches
    pub driver_size: f64,
    /// Port tuning to apply, if the format has an opinion
    pub tuning_freq: Option<f64>,
    /// Topology to force, if any
    pub box_type: Option<BoxType>,
}

/// Look up the preset for a speaker format.
pub fn speaker_preset(speaker: SpeakerType) -> SpeakerPreset {
    match speaker {
        SpeakerType::Tower => SpeakerPreset {
            width: 22.0,
            height: 95.0,
            depth: 30.0,
            driver_size: 6.5,
            tuning_freq: Some(42.0),
            box_type: None,
        },
        SpeakerType::Soundbar => SpeakerPreset {
            width: 100.0,
            height: 12.0,
            depth: 12.0,
            driver_size: 4.0,
            tuning_freq: None,
            box_type: Some(BoxType::Sealed),
        },
        SpeakerType::Bookshelf => SpeakerPreset {
            width: 20.0,
            height: 35.0,
            depth: 25.0,
            driver_size: 6.0,
            tuning_freq: None,
            box_type: None,
        },
        SpeakerType::SubwooferBox => SpeakerPreset {
            width: 45.0,
            height: 40.0,
            depth: 40.0,
            driver_size: 12.0,
            tuning_freq: None,
            box_type: None,
        },
    }
}

/// Return a copy of `base` with the project context and its presets applied.
pub fn apply_project_context(
    base: &DesignParams,
    application: ApplicationType,
    speaker: SpeakerType,
) -> DesignParams {
    let mut next = base.clone();
    next.application = application;
    next.speaker_type = speaker;

    let preset = speaker_preset(speaker);
    next.width = preset.width;
    next.height = preset.height;
    next.depth = preset.depth;
    next.driver_size = preset.driver_size;
    if let Some(fb) = preset.tuning_freq {
        next.port.tuning_freq = fb;
    }
    if let Some(box_type) = preset.box_type {
        next.box_type = box_type;
    }

    // Studio monitors get thick, fully braced panels
    if application == ApplicationType::Studio {
        next.thickness = 25.0;
        next.bracing_type = BracingType::Cross;
    }

    next
}
