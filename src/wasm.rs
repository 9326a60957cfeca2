//! WASM bindings for Enclosure Core.
//!
//! This module wraps [`DesignStore`] for use from a browser UI. Designs,
//! patches and results cross the boundary as JSON strings in the same
//! camelCase shape the design files use.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmEnclosureDesigner } from 'enclosure_core';
//!
//! await init();
//!
//! const designer = new WasmEnclosureDesigner();
//! designer.subscribe((params, result) => {
//!   const r = JSON.parse(result);
//!   drawCharts(r.frequencyResponse, r.coneExcursion, r.portVelocity);
//!   showWarnings(r.warnings, r.advice);
//! });
//!
//! widthSlider.oninput = e => designer.update(JSON.stringify({ width: +e.target.value }));
//! designer.set_project_context('studio', 'bookshelf');
//! ```

use wasm_bindgen::prelude::*;

use crate::design::{self, ApplicationType, DesignPatch, DriverPatch, PortPatch, SpeakerType};
use crate::drivers;
use crate::error::EnclosureError;
use crate::store::{DesignStore, SubscriptionId};

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err(EnclosureError::from(e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| {
        js_err(EnclosureError::WasmError {
            message: e.to_string(),
        })
    })
}

/// WASM-compatible enclosure designer.
#[wasm_bindgen]
pub struct WasmEnclosureDesigner {
    store: DesignStore,
}

#[wasm_bindgen]
impl WasmEnclosureDesigner {
    /// Create a designer holding the initial design.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEnclosureDesigner {
        WasmEnclosureDesigner {
            store: DesignStore::new(),
        }
    }

    /// Create a designer from a full design document.
    #[wasm_bindgen]
    pub fn from_design(design_json: &str) -> Result<WasmEnclosureDesigner, JsValue> {
        let params = design::from_json(design_json).map_err(js_err)?;
        Ok(WasmEnclosureDesigner {
            store: DesignStore::with_params(params),
        })
    }

    /// Register `callback(paramsJson, resultJson)`.
    ///
    /// Called immediately with the current state, then after every edit.
    /// Returns an id for [`unsubscribe`](Self::unsubscribe).
    #[wasm_bindgen]
    pub fn subscribe(&mut self, callback: js_sys::Function) -> usize {
        let id = self.store.subscribe(move |params, result| {
            let payload = serde_json::to_string(params).and_then(|p| Ok((p, serde_json::to_string(result)?)));
            match payload {
                Ok((p, r)) => {
                    if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_str(&p), &JsValue::from_str(&r)) {
                        log::error!("subscriber threw: {:?}", e);
                    }
                }
                Err(e) => log::error!("failed to serialize design: {}", e),
            }
        });
        id.raw()
    }

    /// Remove a subscriber.
    #[wasm_bindgen]
    pub fn unsubscribe(&mut self, id: usize) -> bool {
        self.store.unsubscribe(SubscriptionId::from_raw(id))
    }

    /// Apply a top-level patch, e.g. `{"width": 50, "boxType": "sealed"}`.
    #[wasm_bindgen]
    pub fn update(&mut self, patch_json: &str) -> Result<(), JsValue> {
        let patch: DesignPatch = parse(patch_json)?;
        self.store.update(&patch);
        Ok(())
    }

    /// Apply a port patch, e.g. `{"tuningFreq": 32}`.
    #[wasm_bindgen]
    pub fn update_port(&mut self, patch_json: &str) -> Result<(), JsValue> {
        let patch: PortPatch = parse(patch_json)?;
        self.store.update_port(&patch);
        Ok(())
    }

    /// Apply a driver patch, e.g. `{"xmax": 18}`.
    #[wasm_bindgen]
    pub fn update_driver(&mut self, patch_json: &str) -> Result<(), JsValue> {
        let patch: DriverPatch = parse(patch_json)?;
        self.store.update_driver(&patch);
        Ok(())
    }

    /// Swap in a catalog driver by name.
    #[wasm_bindgen]
    pub fn select_driver(&mut self, name: &str) -> Result<(), JsValue> {
        self.store.select_driver(name).map_err(js_err)
    }

    /// Apply project presets, e.g. `("studio", "bookshelf")`.
    #[wasm_bindgen]
    pub fn set_project_context(&mut self, application: &str, speaker: &str) -> Result<(), JsValue> {
        let application: ApplicationType = parse(&format!("\"{application}\""))?;
        let speaker: SpeakerType = parse(&format!("\"{speaker}\""))?;
        self.store.set_project_context(application, speaker);
        Ok(())
    }

    /// The current design as JSON.
    #[wasm_bindgen]
    pub fn params_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.current())
    }

    /// The latest result as JSON.
    #[wasm_bindgen]
    pub fn result_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.result())
    }
}

impl Default for WasmEnclosureDesigner {
    fn default() -> Self {
        Self::new()
    }
}

/// The driver catalog as a JSON array of design driver records.
#[wasm_bindgen]
pub fn driver_catalog_json() -> Result<String, JsValue> {
    let records: Vec<_> = drivers::catalog().iter().map(|d| d.to_params()).collect();
    to_json(&records)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
