//! Built-in driver catalog.
//!
//! Published Thiele-Small parameters for a handful of common woofers.
//! Records are copied into a design; the design never refers back here.

use crate::design::DriverParams;

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSpec {
    pub name: &'static str,
    pub fs: f64,
    pub qts: f64,
    pub vas: f64,
    pub xmax: f64,
    pub sd: f64,
}

impl DriverSpec {
    /// Copy this entry into an owned parameter record.
    pub fn to_params(&self) -> DriverParams {
        DriverParams {
            name: self.name.to_string(),
            fs: self.fs,
            qts: self.qts,
            vas: self.vas,
            xmax: self.xmax,
            sd: self.sd,
        }
    }
}

const CATALOG: &[DriverSpec] = &[
    DriverSpec { name: "Generic 12\" (Standard)", fs: 34.0, qts: 0.45, vas: 56.0, xmax: 12.0, sd: 510.0 },
    DriverSpec { name: "JL Audio 12W7AE (SPL)", fs: 27.2, qts: 0.48, vas: 66.0, xmax: 29.0, sd: 593.0 },
    DriverSpec { name: "Kicker L7 12 (Square)", fs: 34.0, qts: 0.54, vas: 45.0, xmax: 16.0, sd: 620.0 },
    DriverSpec { name: "Dayton Ultimax 12 (Hi-Fi)", fs: 26.0, qts: 0.42, vas: 72.0, xmax: 19.0, sd: 490.0 },
    DriverSpec { name: "Skar Audio EVL-12 (Street)", fs: 38.0, qts: 0.45, vas: 35.0, xmax: 24.0, sd: 480.0 },
    DriverSpec { name: "B&C 18TBW100 (Pro Audio)", fs: 35.0, qts: 0.35, vas: 180.0, xmax: 12.0, sd: 1210.0 },
    DriverSpec { name: "Scan-Speak 18W (Studio)", fs: 42.0, qts: 0.38, vas: 25.0, xmax: 8.0, sd: 145.0 },
];

/// All catalog entries, in display order.
pub fn catalog() -> &'static [DriverSpec] {
    CATALOG
}

/// Find an entry by name, ignoring case and surrounding whitespace.
///
/// A unique prefix match is accepted too, so `"dayton"` finds the Ultimax.
pub fn find(name: &str) -> Option<&'static DriverSpec> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = CATALOG.iter().find(|d| d.name.to_lowercase() == needle) {
        return Some(exact);
    }

    let mut prefixed = CATALOG
        .iter()
        .filter(|d| d.name.to_lowercase().starts_with(&needle));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

/// The driver a fresh design starts with.
pub fn default_driver() -> DriverParams {
    CATALOG[0].to_params()
}
