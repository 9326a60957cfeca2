//! The simulation pipeline.

use crate::design::{BoxType, DesignParams};

use super::curves::{cone_excursion, frequency_response, port_velocity, Alignment};
use super::cut_sheet::cut_sheet;
use super::geometry::{
    bracing_displacement, divider_displacement, driver_displacement, InternalDimensions,
};
use super::port::{port_area, port_displacement, port_length};
use super::result::{Displacement, SimulationResult};
use super::{SimulationConfig, PORT_CLEARANCE_CM, PORT_NOISE_VELOCITY_MS};

/// Lowest frequency the model accepts for Fs or Fb (Hz).
const MIN_FREQUENCY_HZ: f64 = 1.0;
/// Lowest driver Q the model accepts.
const MIN_QTS: f64 = 0.05;
/// Smallest air volume a port may be tuned against (L).
const MIN_TUNED_VOLUME_L: f64 = 0.1;

fn positive_or(value: f64, floor: f64) -> f64 {
    if value.is_finite() && value > floor {
        value
    } else {
        floor
    }
}

/// Simulate a design with the default configuration.
pub fn calculate(params: &DesignParams) -> SimulationResult {
    calculate_with(params, &SimulationConfig::default())
}

/// Simulate a design.
///
/// Never fails. A box with no usable interior yields
/// [`SimulationResult::degenerate`]; an invalid `config` is replaced by the
/// default one.
pub fn calculate_with(params: &DesignParams, config: &SimulationConfig) -> SimulationResult {
    let fallback;
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("{e}; falling back to the default simulation config");
            fallback = SimulationConfig::default();
            &fallback
        }
    };

    let inner = match InternalDimensions::from_params(params) {
        Ok(dims) => dims,
        Err(message) => {
            log::warn!("{message}");
            return SimulationResult::degenerate(message);
        }
    };

    let box_type = params.box_type;
    let fs = positive_or(params.driver.fs, MIN_FREQUENCY_HZ);
    let qts = positive_or(params.driver.qts, MIN_QTS);
    let vas = positive_or(params.driver.vas, 0.0);
    let sd = positive_or(params.driver.sd, 0.0);
    let tuning_freq = positive_or(params.port.tuning_freq, MIN_FREQUENCY_HZ);
    let chamber_ratio = if params.chamber_ratio.is_finite() {
        params.chamber_ratio.clamp(0.0, 1.0)
    } else {
        0.5
    };

    // Volumes
    let gross = inner.volume();
    let mut displacement = Displacement {
        driver: driver_displacement(sd),
        port: 0.0,
        bracing: bracing_displacement(params.bracing_type, gross),
        divider: divider_displacement(box_type, &inner, params.thickness_cm()),
    };

    // Port sizing
    let mut length = 0.0;
    let mut area = 0.0;
    if box_type.is_vented() {
        area = port_area(&params.port);
        let before_port = gross - displacement.driver - displacement.bracing - displacement.divider;
        let tuned_volume = match box_type {
            BoxType::Bandpass4th => before_port * (1.0 - chamber_ratio),
            BoxType::Sealed | BoxType::Ported => before_port,
        };
        length = port_length(
            params.port.port_type,
            area,
            tuning_freq,
            tuned_volume.max(MIN_TUNED_VOLUME_L),
        );
        displacement.port = port_displacement(params.port.port_type, area, length);
    }

    let net = gross - displacement.total();
    if !(net > 0.0) {
        let message = format!(
            "Invalid geometry: driver, bracing and port displace {:.1} L of a {:.1} L box.",
            displacement.total(),
            gross
        );
        log::warn!("{message}");
        return SimulationResult::degenerate(message);
    }

    let (chamber1, chamber2) = match box_type {
        BoxType::Bandpass4th => {
            let rear = net * chamber_ratio;
            (rear, net - rear)
        }
        BoxType::Sealed | BoxType::Ported => (net, 0.0),
    };

    let mut warnings = Vec::new();

    let is_port_collision = box_type.is_vented() && length > params.depth - PORT_CLEARANCE_CM;
    if is_port_collision {
        warnings.push(format!(
            "Port collision: a {length:.1} cm port does not fit in {:.1} cm of depth \
             ({PORT_CLEARANCE_CM} cm clearance).",
            params.depth
        ));
    }

    // Curves
    let alignment = Alignment {
        box_type,
        fs,
        qts,
        vas,
        sd,
        net_volume: net,
        tuning_freq,
        port_area: area,
    };
    let frequency_response = frequency_response(&alignment, config);
    let cone_excursion = cone_excursion(&alignment, config);
    let port_velocity = port_velocity(&alignment, config);

    let peak_excursion = cone_excursion.peak();
    if peak_excursion > params.driver.xmax {
        warnings.push(format!(
            "DANGER: cone excursion reaches {peak_excursion:.1} mm, beyond Xmax ({} mm) at {} W.",
            params.driver.xmax, config.drive_power
        ));
    }

    let peak_velocity = port_velocity.peak();
    if peak_velocity > PORT_NOISE_VELOCITY_MS {
        warnings.push(format!(
            "Port noise likely: air speed peaks at {peak_velocity:.1} m/s \
             (> {PORT_NOISE_VELOCITY_MS} m/s). Increase the port area."
        ));
    }

    log::debug!(
        "simulated {box_type} box: gross {gross:.2} L, net {net:.2} L, port {length:.1} cm, {} warning(s)",
        warnings.len()
    );

    SimulationResult {
        gross_volume: gross,
        net_total: net,
        chamber1,
        chamber2,
        displacement,
        port_length: length,
        is_port_collision,
        warnings,
        advice: Vec::new(),
        frequency_response,
        cone_excursion,
        port_velocity,
        cut_sheet: cut_sheet(params, &inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{BracingType, DriverParams, PortParams, PortType};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// 45×60×40 cm, 18 mm, ported, generic 12" on a 10 cm flared port at 36 Hz.
    fn reference_design() -> DesignParams {
        DesignParams {
            width: 45.0,
            height: 60.0,
            depth: 40.0,
            thickness: 18.0,
            box_type: BoxType::Ported,
            driver: DriverParams {
                name: "Reference".to_string(),
                fs: 34.0,
                qts: 0.45,
                vas: 56.0,
                xmax: 12.0,
                sd: 510.0,
            },
            port: PortParams {
                port_type: PortType::AeroFlare,
                tuning_freq: 36.0,
                diameter: 10.0,
                count: 1,
                ..PortParams::default()
            },
            ..DesignParams::default()
        }
    }

    fn all_designs() -> Vec<DesignParams> {
        let mut designs = Vec::new();
        for box_type in [BoxType::Sealed, BoxType::Ported, BoxType::Bandpass4th] {
            for port_type in [PortType::Circular, PortType::Slot, PortType::AeroFlare] {
                for bracing_type in [BracingType::None, BracingType::Window, BracingType::Cross] {
                    for tuning_freq in [18.0, 36.0, 52.5, 90.0] {
                        let mut p = reference_design();
                        p.box_type = box_type;
                        p.bracing_type = bracing_type;
                        p.port.port_type = port_type;
                        p.port.tuning_freq = tuning_freq;
                        p.chamber_ratio = 0.35;
                        designs.push(p);
                    }
                }
            }
        }
        designs
    }

    fn assert_finite(r: &SimulationResult) {
        let scalars = [
            r.gross_volume,
            r.net_total,
            r.chamber1,
            r.chamber2,
            r.port_length,
            r.displacement.total(),
        ];
        assert!(scalars.iter().all(|v| v.is_finite()), "{scalars:?}");
        for curve in [&r.frequency_response, &r.cone_excursion, &r.port_velocity] {
            assert!(curve.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn test_reference_scenario() {
        let r = calculate(&reference_design());
        assert_relative_eq!(r.gross_volume, 84.992_544, epsilon = 1e-6);
        assert_relative_eq!(r.displacement.driver, 4.08, epsilon = 1e-9);
        assert!(r.port_length > 1.0 && r.port_length < 35.0);
        assert!(!r.is_port_collision);
        assert_eq!(r.cut_sheet.len(), 4); // three panel pairs plus the window brace

        // 500 W drives the cone past Xmax and the port past 30 m/s
        assert!(r.cone_excursion.peak() > 12.0);
        assert!(r.port_velocity.peak() > PORT_NOISE_VELOCITY_MS);
        assert_eq!(r.warnings.len(), 2);
        assert!(r.warnings[0].starts_with("DANGER"));
        assert!(r.warnings[1].starts_with("Port noise"));
    }

    #[test]
    fn test_low_power_design_has_no_warnings() {
        let config = SimulationConfig::new().with_drive_power(25.0);
        let r = calculate_with(&reference_design(), &config);
        assert!(r.cone_excursion.peak() <= 12.0);
        assert!(r.port_velocity.peak() <= PORT_NOISE_VELOCITY_MS);
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
    }

    #[test]
    fn test_excursion_warning_alone() {
        let config = SimulationConfig::new().with_drive_power(25.0);
        let mut p = reference_design();
        p.driver.xmax = 5.0;
        let r = calculate_with(&p, &config);
        assert_eq!(r.warnings.len(), 1, "{:?}", r.warnings);
        assert!(r.warnings[0].starts_with("DANGER"));
        assert!(r.warnings[0].contains("Xmax (5 mm) at 25 W"));
    }

    #[test]
    fn test_port_noise_warning_alone() {
        let config = SimulationConfig::new().with_drive_power(25.0);
        let mut p = reference_design();
        p.port.diameter = 5.0;
        let r = calculate_with(&p, &config);
        assert!(!r.is_port_collision);
        assert_eq!(r.warnings.len(), 1, "{:?}", r.warnings);
        assert!(r.warnings[0].starts_with("Port noise"));
        assert!(r.warnings[0].contains("Increase the port area"));
    }

    #[test]
    fn test_net_volume_accounts_for_all_displacement() {
        for p in all_designs() {
            let r = calculate(&p);
            let d = r.displacement;
            assert_eq!(r.net_total, r.gross_volume - (d.driver + d.bracing + d.divider + d.port));
        }
    }

    #[test]
    fn test_chamber_split() {
        for p in all_designs() {
            let r = calculate(&p);
            if p.box_type == BoxType::Bandpass4th {
                assert_abs_diff_eq!(r.chamber1 + r.chamber2, r.net_total, epsilon = 1e-9);
                assert_abs_diff_eq!(r.chamber1, r.net_total * 0.35, epsilon = 1e-9);
                assert!(r.displacement.divider > 0.0);
            } else {
                assert_eq!(r.chamber2, 0.0);
                assert_eq!(r.chamber1, r.net_total);
                assert_eq!(r.displacement.divider, 0.0);
            }
        }
    }

    #[test]
    fn test_port_length_floor_and_collision_flag() {
        for p in all_designs() {
            let r = calculate(&p);
            if p.box_type.is_vented() {
                assert!(r.port_length >= 1.0);
                assert_eq!(r.is_port_collision, r.port_length > p.depth - 5.0);
            }
            assert_finite(&r);
        }
    }

    #[test]
    fn test_port_velocity_peaks_at_nearest_sweep_point() {
        for p in all_designs().into_iter().filter(|p| p.box_type.is_vented()) {
            let r = calculate(&p);
            let peak = r.port_velocity.max_point().unwrap();
            let nearest = r
                .port_velocity
                .iter()
                .map(|pt| (pt.x - p.port.tuning_freq).abs())
                .fold(f64::INFINITY, f64::min);
            assert_abs_diff_eq!((peak.x - p.port.tuning_freq).abs(), nearest, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sealed_scenario() {
        let p = DesignParams {
            box_type: BoxType::Sealed,
            ..reference_design()
        };
        let r = calculate(&p);
        assert_eq!(r.port_length, 0.0);
        assert_eq!(r.displacement.port, 0.0);
        assert_eq!(r.chamber2, 0.0);
        assert!(!r.is_port_collision);
        assert_eq!(r.port_velocity.len(), 141);
        assert!(r.port_velocity.iter().all(|pt| pt.y == 0.0));
    }

    #[test]
    fn test_long_port_collides() {
        let mut p = reference_design();
        p.port.tuning_freq = 18.0;
        p.port.diameter = 15.0;
        let r = calculate(&p);
        assert!(r.port_length > p.depth - 5.0);
        assert!(r.is_port_collision);
        assert!(r.warnings[0].starts_with("Port collision"));
    }

    #[test]
    fn test_collapsed_box_is_degenerate() {
        let p = DesignParams {
            width: 3.0,
            ..reference_design()
        };
        let r = calculate(&p);
        assert_eq!(r.warnings.len(), 1);
        assert!(r.is_degenerate());
        assert_eq!(r.gross_volume, 0.0);
        assert_eq!(r.net_total, 0.0);
        assert_eq!(r.chamber1, 0.0);
        assert_eq!(r.port_length, 0.0);
        assert!(r.cut_sheet.is_empty());
        assert!(r.frequency_response.is_empty());
    }

    #[test]
    fn test_overfilled_box_is_degenerate() {
        // tiny box, huge cone
        let mut p = reference_design();
        p.width = 10.0;
        p.height = 10.0;
        p.depth = 10.0;
        p.driver.sd = 1210.0;
        let r = calculate(&p);
        assert!(r.is_degenerate());
        assert!(r.warnings[0].contains("displace"));
    }

    #[test]
    fn test_garbage_driver_values_stay_finite() {
        let mut p = reference_design();
        p.driver.fs = f64::NAN;
        p.driver.qts = 0.0;
        p.driver.vas = -3.0;
        p.port.tuning_freq = f64::INFINITY;
        p.port.diameter = 0.0;
        p.chamber_ratio = f64::NAN;
        for box_type in [BoxType::Sealed, BoxType::Ported, BoxType::Bandpass4th] {
            p.box_type = box_type;
            assert_finite(&calculate(&p));
        }

        // pinhole and oversized ports are closed, not infinite
        for diameter in [1e-160, 1e200] {
            let mut p = reference_design();
            p.port.diameter = diameter;
            for box_type in [BoxType::Ported, BoxType::Bandpass4th] {
                p.box_type = box_type;
                let r = calculate(&p);
                assert_finite(&r);
                assert_eq!(r.port_velocity.peak(), 0.0);
                assert!(r.warnings.iter().all(|w| !w.contains("inf")));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let p = reference_design();
        assert_eq!(calculate(&p), calculate(&p));
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let p = reference_design();
        let bad = SimulationConfig::new().with_sweep(10.0, 150.0, 0.0);
        assert_eq!(calculate_with(&p, &bad), calculate(&p));
    }

    #[test]
    fn test_custom_sweep() {
        let p = reference_design();
        let config = SimulationConfig::new().with_sweep(20.0, 80.0, 2.0);
        let r = calculate_with(&p, &config);
        assert_eq!(r.frequency_response.len(), 31);
        assert_eq!(r.port_velocity.max_point().unwrap().x, 36.0);
    }
}
