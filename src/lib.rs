//! # Enclosure Core
//!
//! A parametric loudspeaker enclosure designer.
//!
//! This library provides:
//! - A design model covering cabinet geometry, topology, driver and port
//! - A lumped-parameter simulation of volumes, port length, frequency
//!   response, cone excursion and port air velocity
//! - A rule-based advisor that flags risky or mismatched designs
//! - A reactive store that recomputes everything on each edit and notifies
//!   subscribers
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`design`] - Design parameters, partial updates and project presets
//! - [`drivers`] - Built-in catalog of driver Thiele-Small parameters
//! - [`acoustics`] - Simulation engine and result types
//! - [`advisor`] - Advice rules evaluated over a simulation result
//! - [`store`] - Owner of the live design and its subscribers
//! - [`report`] - Text and JSON reports (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! enclosure --context hifi_home tower --driver dayton --box-type sealed
//! enclosure design.json --json > result.json
//! ```
//!
//! ### Library
//!
//! ```
//! use enclosure_core::{DesignPatch, DesignStore};
//!
//! let mut store = DesignStore::new();
//! store.subscribe(|params, result| {
//!     println!("{} cm deep: {:.1} L net", params.depth, result.net_total);
//! });
//! store.update(&DesignPatch::new().with_depth(45.0));
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmEnclosureDesigner } from 'enclosure_core';
//!
//! const designer = new WasmEnclosureDesigner();
//! designer.subscribe((params, result) => render(JSON.parse(params), JSON.parse(result)));
//! designer.update('{"width": 50}');
//! ```

pub mod acoustics;
pub mod advisor;
pub mod design;
pub mod drivers;
pub mod error;
pub mod store;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use acoustics::{calculate, calculate_with, SimulationConfig, SimulationResult};
pub use advisor::{analyze, Advice, AdviceLevel};
pub use design::{DesignParams, DesignPatch, DriverPatch, PortPatch};
pub use error::{EnclosureError, Result};
pub use store::{DesignSnapshot, DesignStore, SubscriptionId};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmEnclosureDesigner;
