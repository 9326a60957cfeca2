//! Core types describing an enclosure design.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers;

/// Usage context of the finished speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    #[default]
    #[cfg_attr(feature = "cli", value(name = "car_audio"))]
    CarAudio,
    #[cfg_attr(feature = "cli", value(name = "hifi_home"))]
    HifiHome,
    Studio,
    #[cfg_attr(feature = "cli", value(name = "pa_live"))]
    PaLive,
}

impl ApplicationType {
    /// Tag used in design files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarAudio => "car_audio",
            Self::HifiHome => "hifi_home",
            Self::Studio => "studio",
            Self::PaLive => "pa_live",
        }
    }
}

/// Physical format of the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SpeakerType {
    #[default]
    #[cfg_attr(feature = "cli", value(name = "subwoofer_box"))]
    SubwooferBox,
    Tower,
    Bookshelf,
    Soundbar,
}

impl SpeakerType {
    /// Tag used in design files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubwooferBox => "subwoofer_box",
            Self::Tower => "tower",
            Self::Bookshelf => "bookshelf",
            Self::Soundbar => "soundbar",
        }
    }
}

/// Acoustic topology of the enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BoxType {
    /// Acoustic suspension
    Sealed,
    /// Bass reflex
    #[default]
    Ported,
    /// Fourth-order bandpass: sealed rear chamber, ported front chamber
    #[serde(rename = "bandpass4")]
    #[cfg_attr(feature = "cli", value(name = "bandpass4"))]
    Bandpass4th,
}

impl BoxType {
    /// Tag used in design files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sealed => "sealed",
            Self::Ported => "ported",
            Self::Bandpass4th => "bandpass4",
        }
    }

    /// Whether this topology has a port to size.
    pub fn is_vented(&self) -> bool {
        !matches!(self, Self::Sealed)
    }
}

/// Shape of the vent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Round tube
    Circular,
    /// Rectangular slot built from panel stock
    Slot,
    /// Round tube with flared mouths
    #[default]
    #[serde(rename = "aero")]
    #[cfg_attr(feature = "cli", value(name = "aero"))]
    AeroFlare,
}

impl PortType {
    /// Tag used in design files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Slot => "slot",
            Self::AeroFlare => "aero",
        }
    }
}

/// Internal reinforcement of the cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BracingType {
    None,
    #[default]
    Window,
    Cross,
}

impl BracingType {
    /// Tag used in design files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Window => "window",
            Self::Cross => "cross",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(ApplicationType, SpeakerType, BoxType, PortType, BracingType);

/// Thiele-Small parameters of a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverParams {
    pub name: String,
    /// Free-air resonance (Hz)
    pub fs: f64,
    /// Total Q
    pub qts: f64,
    /// Equivalent compliance volume (L)
    pub vas: f64,
    /// Maximum linear excursion (mm)
    pub xmax: f64,
    /// Effective cone area (cm²)
    pub sd: f64,
}

impl Default for DriverParams {
    fn default() -> Self {
        drivers::default_driver()
    }
}

/// Vent configuration. Only the dimensions matching `port_type` are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortParams {
    #[serde(rename = "type")]
    pub port_type: PortType,
    /// Box tuning frequency Fb (Hz)
    pub tuning_freq: f64,
    /// Diameter for circular and flared ports (cm)
    pub diameter: f64,
    /// Slot width (cm)
    pub width: f64,
    /// Slot height (cm)
    pub height: f64,
    /// Number of identical ports
    pub count: u32,
}

impl Default for PortParams {
    fn default() -> Self {
        Self {
            port_type: PortType::AeroFlare,
            tuning_freq: 36.0,
            diameter: 10.0,
            width: 30.0,
            height: 5.0,
            count: 1,
        }
    }
}

/// The complete user-editable design.
///
/// External dimensions are in centimeters, panel thickness in millimeters.
/// The view flags ride along for the renderer; the simulation ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignParams {
    pub application: ApplicationType,
    pub speaker_type: SpeakerType,

    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,

    pub box_type: BoxType,
    pub bracing_type: BracingType,
    /// Nominal driver size in inches, used by the renderer
    pub driver_size: f64,
    pub driver: DriverParams,
    pub port: PortParams,
    /// Rear (sealed) share of the usable volume in a bandpass box, 0.0 to 1.0
    pub chamber_ratio: f64,

    pub is_exploded: bool,
    pub is_transparent: bool,
    pub is_solid: bool,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            application: ApplicationType::CarAudio,
            speaker_type: SpeakerType::SubwooferBox,
            width: 45.0,
            height: 60.0,
            depth: 40.0,
            thickness: 18.0,
            box_type: BoxType::Ported,
            bracing_type: BracingType::Window,
            driver_size: 12.0,
            driver: drivers::default_driver(),
            port: PortParams::default(),
            chamber_ratio: 0.5,
            is_exploded: false,
            is_transparent: false,
            is_solid: false,
        }
    }
}

impl DesignParams {
    /// Panel thickness in centimeters.
    pub fn thickness_cm(&self) -> f64 {
        self.thickness / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_tags_match_serde() {
        let json = serde_json::to_string(&BoxType::Bandpass4th).unwrap();
        assert_eq!(json, "\"bandpass4\"");
        assert_eq!(BoxType::Bandpass4th.as_str(), "bandpass4");

        let port: PortType = serde_json::from_str("\"aero\"").unwrap();
        assert_eq!(port, PortType::AeroFlare);

        let app: ApplicationType = serde_json::from_str("\"pa_live\"").unwrap();
        assert_eq!(app, ApplicationType::PaLive);
        assert_eq!(SpeakerType::SubwooferBox.to_string(), "subwoofer_box");
    }

    #[test]
    fn test_default_design() {
        let p = DesignParams::default();
        assert_eq!(p.box_type, BoxType::Ported);
        assert_eq!(p.port.port_type, PortType::AeroFlare);
        assert_eq!(p.driver.fs, 34.0);
        assert!((p.thickness_cm() - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_camel_case_fields() {
        let p: DesignParams =
            serde_json::from_str(r#"{"boxType":"sealed","port":{"type":"slot","tuningFreq":30}}"#)
                .unwrap();
        assert_eq!(p.box_type, BoxType::Sealed);
        assert_eq!(p.port.port_type, PortType::Slot);
        assert_eq!(p.port.tuning_freq, 30.0);
        // untouched fields fall back to the initial design
        assert_eq!(p.width, 45.0);
        assert_eq!(p.port.count, 1);
    }
}
