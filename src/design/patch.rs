//! Partial updates to a design.
//!
//! A patch lists the fields to overwrite; `apply` returns a new snapshot and
//! never touches the base. Nested records (`port`, `driver`) are replaced
//! wholesale by [`DesignPatch`] and edited field by field through
//! [`PortPatch`] and [`DriverPatch`].

use serde::Deserialize;

use super::types::*;

macro_rules! setters {
    ($($field:ident / $setter:ident : $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Overwrite `", stringify!($field), "`.")]
            pub fn $setter(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

macro_rules! overwrite {
    ($target:ident, $patch:ident; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )*
    };
}

/// Shallow patch over [`DesignParams`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DesignPatch {
    pub application: Option<ApplicationType>,
    pub speaker_type: Option<SpeakerType>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub thickness: Option<f64>,
    pub box_type: Option<BoxType>,
    pub bracing_type: Option<BracingType>,
    pub driver_size: Option<f64>,
    pub driver: Option<DriverParams>,
    pub port: Option<PortParams>,
    pub chamber_ratio: Option<f64>,
    pub is_exploded: Option<bool>,
    pub is_transparent: Option<bool>,
    pub is_solid: Option<bool>,
}

impl DesignPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        application / with_application: ApplicationType,
        speaker_type / with_speaker_type: SpeakerType,
        width / with_width: f64,
        height / with_height: f64,
        depth / with_depth: f64,
        thickness / with_thickness: f64,
        box_type / with_box_type: BoxType,
        bracing_type / with_bracing_type: BracingType,
        driver_size / with_driver_size: f64,
        driver / with_driver: DriverParams,
        port / with_port: PortParams,
        chamber_ratio / with_chamber_ratio: f64,
        is_exploded / with_exploded: bool,
        is_transparent / with_transparent: bool,
        is_solid / with_solid: bool,
    }

    /// Set all three external dimensions at once.
    pub fn with_dimensions(self, width: f64, height: f64, depth: f64) -> Self {
        self.with_width(width).with_height(height).with_depth(depth)
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce a new snapshot with this patch's fields overwritten.
    pub fn apply(&self, base: &DesignParams) -> DesignParams {
        let mut next = base.clone();
        overwrite!(next, self;
            application, speaker_type, width, height, depth, thickness,
            box_type, bracing_type, driver_size, driver, port, chamber_ratio,
            is_exploded, is_transparent, is_solid,
        );
        next
    }
}

/// Field-level patch over [`PortParams`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PortPatch {
    #[serde(rename = "type")]
    pub port_type: Option<PortType>,
    pub tuning_freq: Option<f64>,
    pub diameter: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub count: Option<u32>,
}

impl PortPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        port_type / with_type: PortType,
        tuning_freq / with_tuning_freq: f64,
        diameter / with_diameter: f64,
        width / with_width: f64,
        height / with_height: f64,
        count / with_count: u32,
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce a new port record with this patch's fields overwritten.
    pub fn apply(&self, base: &PortParams) -> PortParams {
        let mut next = base.clone();
        overwrite!(next, self; port_type, tuning_freq, diameter, width, height, count);
        next
    }
}

/// Field-level patch over [`DriverParams`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub fs: Option<f64>,
    pub qts: Option<f64>,
    pub vas: Option<f64>,
    pub xmax: Option<f64>,
    pub sd: Option<f64>,
}

impl DriverPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        name / with_name: String,
        fs / with_fs: f64,
        qts / with_qts: f64,
        vas / with_vas: f64,
        xmax / with_xmax: f64,
        sd / with_sd: f64,
    }

    /// Produce a new driver record with this patch's fields overwritten.
    pub fn apply(&self, base: &DriverParams) -> DriverParams {
        let mut next = base.clone();
        overwrite!(next, self; name, fs, qts, vas, xmax, sd);
        next
    }
}
