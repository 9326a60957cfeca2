//! The advice rule table.

use crate::acoustics::{SimulationResult, PORT_CLEARANCE_CM};
use crate::design::{ApplicationType, BoxType, BracingType, DesignParams, SpeakerType};

use super::Advice;

/// A rule: inspect the design and its result, maybe produce advice.
pub type Rule = fn(&DesignParams, &SimulationResult) -> Option<Advice>;

/// Every rule, in the order its advice is presented.
pub const RULES: &[Rule] = &[
    car_audio_low_tuning,
    car_audio_sealed_power,
    hifi_high_tuning,
    studio_flatness,
    pa_live_panel_thickness,
    soundbar_depth,
    soundbar_port,
    tower_height,
    tower_bracing,
    port_too_long,
];

fn car_audio_low_tuning(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.application == ApplicationType::CarAudio
        && p.box_type == BoxType::Ported
        && p.port.tuning_freq < 32.0)
        .then(|| {
            Advice::warning("Car audio: tuning below 32 Hz loses efficiency. Raise it to 34-38 Hz.")
        })
}

fn car_audio_sealed_power(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.application == ApplicationType::CarAudio && p.box_type == BoxType::Sealed).then(|| {
        Advice::info("Sealed: tight control, but it needs more power for the same SPL.")
    })
}

fn hifi_high_tuning(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.application == ApplicationType::HifiHome
        && p.box_type == BoxType::Ported
        && p.port.tuning_freq > 40.0)
        .then(|| {
            Advice::info("Hi-Fi: high tuning (>40 Hz) gives shallow bass. For deep bass, go down to 30-35 Hz.")
        })
}

fn studio_flatness(p: &DesignParams, r: &SimulationResult) -> Option<Advice> {
    if p.application != ApplicationType::Studio {
        return None;
    }
    let peak = r.frequency_response.max_point()?.y;
    (peak > 3.0).then(|| {
        Advice::warning(format!(
            "Studio: response is not flat (+{peak:.1} dB peak). Enlarge the box or lower the tuning."
        ))
    })
}

fn pa_live_panel_thickness(p: &DesignParams, r: &SimulationResult) -> Option<Advice> {
    (p.application == ApplicationType::PaLive && p.thickness < 25.0 && r.net_total > 80.0)
        .then(|| Advice::error("PA live: use 25 mm panels for cabinets this large."))
}

fn soundbar_depth(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.speaker_type == SpeakerType::Soundbar && p.depth > 20.0)
        .then(|| Advice::info("Soundbar: more than 20 cm deep is awkward to wall-mount."))
}

fn soundbar_port(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.speaker_type == SpeakerType::Soundbar && p.box_type == BoxType::Ported).then(|| {
        Advice::warning("Soundbar: a port here is prone to cabinet noise. Consider sealed or a passive radiator.")
    })
}

fn tower_height(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.speaker_type == SpeakerType::Tower && p.height < 80.0)
        .then(|| Advice::info("Short for a tower. Is this really a bookshelf design?"))
}

fn tower_bracing(p: &DesignParams, _: &SimulationResult) -> Option<Advice> {
    (p.speaker_type == SpeakerType::Tower && p.bracing_type == BracingType::None)
        .then(|| Advice::error("Tower: internal bracing is mandatory."))
}

fn port_too_long(p: &DesignParams, r: &SimulationResult) -> Option<Advice> {
    (r.port_length > 0.0 && r.port_length > p.depth - PORT_CLEARANCE_CM).then(|| {
        Advice::error("Port too long for the cabinet. Use an elbow (L-shaped port) or deepen the cabinet.")
    })
}
