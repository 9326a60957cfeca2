//! Enclosure - Loudspeaker Enclosure Designer
//!
//! Simulates a speaker cabinet and prints volumes, port size, warnings,
//! advice and a cut sheet.
//!
//! # Usage
//!
//! ```bash
//! enclosure --context car_audio subwoofer_box --tuning 34 --diameter 12
//! enclosure design.json --json
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use enclosure_core::{
    design::{self, ApplicationType, BoxType, BracingType, PortType, SpeakerType},
    drivers,
    error::Result,
    report, DesignParams, DesignPatch, DesignStore, PortPatch, SimulationConfig,
};

/// Loudspeaker enclosure designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Design file (JSON); starts from the built-in design if omitted
    #[arg(value_name = "DESIGN_FILE")]
    design_file: Option<PathBuf>,

    /// Apply the presets for an application and speaker format
    #[arg(long, num_args = 2, value_names = ["APPLICATION", "SPEAKER"])]
    context: Option<Vec<String>>,

    /// External width (cm)
    #[arg(long)]
    width: Option<f64>,

    /// External height (cm)
    #[arg(long)]
    height: Option<f64>,

    /// External depth (cm)
    #[arg(long)]
    depth: Option<f64>,

    /// Panel thickness (mm)
    #[arg(long)]
    thickness: Option<f64>,

    /// Enclosure topology
    #[arg(long, value_enum)]
    box_type: Option<BoxType>,

    /// Internal bracing
    #[arg(long, value_enum)]
    bracing: Option<BracingType>,

    /// Rear chamber share of a bandpass box (0-1)
    #[arg(long)]
    chamber_ratio: Option<f64>,

    /// Port shape
    #[arg(long, value_enum)]
    port_type: Option<PortType>,

    /// Port tuning frequency (Hz)
    #[arg(long)]
    tuning: Option<f64>,

    /// Round port diameter (cm)
    #[arg(long)]
    diameter: Option<f64>,

    /// Slot port width (cm)
    #[arg(long)]
    slot_width: Option<f64>,

    /// Slot port height (cm)
    #[arg(long)]
    slot_height: Option<f64>,

    /// Number of ports
    #[arg(long)]
    port_count: Option<u32>,

    /// Driver from the catalog (name or unique prefix)
    #[arg(long)]
    driver: Option<String>,

    /// Reference amplifier power (W)
    #[arg(long, default_value_t = 500.0)]
    power: f64,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// List the driver catalog and exit
    #[arg(long)]
    list_drivers: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn design_patch(&self) -> DesignPatch {
        DesignPatch {
            width: self.width,
            height: self.height,
            depth: self.depth,
            thickness: self.thickness,
            box_type: self.box_type,
            bracing_type: self.bracing,
            chamber_ratio: self.chamber_ratio,
            ..DesignPatch::default()
        }
    }

    fn port_patch(&self) -> PortPatch {
        PortPatch {
            port_type: self.port_type,
            tuning_freq: self.tuning,
            diameter: self.diameter,
            width: self.slot_width,
            height: self.slot_height,
            count: self.port_count,
        }
    }
}

fn parse_context(values: &[String]) -> std::result::Result<(ApplicationType, SpeakerType), String> {
    use clap::ValueEnum;

    let [app, speaker] = values else {
        return Err("--context takes an application and a speaker format".to_string());
    };
    let app = ApplicationType::from_str(app, true)?;
    let speaker = SpeakerType::from_str(speaker, true)?;
    Ok((app, speaker))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.list_drivers {
        for d in drivers::catalog() {
            println!(
                "{:<28} Fs {:>5} Hz  Qts {:>4}  Vas {:>5} L  Xmax {:>4} mm  Sd {:>6} cm²",
                d.name, d.fs, d.qts, d.vas, d.xmax, d.sd
            );
        }
        return Ok(());
    }

    // Load the starting design
    let params = match &args.design_file {
        Some(path) => design::load_file(path)?,
        None => DesignParams::default(),
    };

    let config = SimulationConfig::new().with_drive_power(args.power);
    let mut store = DesignStore::with_config(params, config)?;
    store.subscribe(|p, r| {
        log::info!(
            "{} box {}x{}x{} cm: net {:.1} L, {} warning(s), {} advice",
            p.box_type,
            p.width,
            p.height,
            p.depth,
            r.net_total,
            r.warnings.len(),
            r.advice.len()
        );
    });

    // Apply edits in the same order the UI would
    if let Some(values) = &args.context {
        let (app, speaker) = parse_context(values).map_err(enclosure_core::EnclosureError::invalid_design)?;
        store.set_project_context(app, speaker);
    }
    if let Some(name) = &args.driver {
        store.select_driver(name)?;
    }
    let patch = args.design_patch();
    if !patch.is_empty() {
        store.update(&patch);
    }
    let port = args.port_patch();
    if !port.is_empty() {
        store.update_port(&port);
    }

    // Report
    let mut stdout = io::stdout().lock();
    if args.json {
        report::write_json(&mut stdout, &store.snapshot())?;
    } else {
        let snapshot = store.snapshot();
        report::write_text(&mut stdout, &snapshot.params, &snapshot.result)?;
    }

    Ok(())
}
