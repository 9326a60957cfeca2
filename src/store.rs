//! The design store.
//!
//! [`DesignStore`] owns the current design. Every mutation replaces the
//! design with a new snapshot, re-runs the simulation and the advisor from
//! scratch, and then calls each subscriber in registration order before
//! returning. Nothing is cached between runs and nothing is rolled back.

use serde::Serialize;

use crate::acoustics::{calculate_with, SimulationConfig, SimulationResult};
use crate::advisor::analyze;
use crate::design::{
    apply_project_context, ApplicationType, DesignParams, DesignPatch, DriverPatch, PortPatch,
    SpeakerType,
};
use crate::drivers;
use crate::error::{EnclosureError, Result};

/// Callback receiving every freshly computed design and result.
pub type Listener = Box<dyn FnMut(&DesignParams, &SimulationResult)>;

/// Handle returned by [`DesignStore::subscribe`].
///
/// Opaque: only the store that issued an id can hand it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    /// Rebuild an id previously exported with [`SubscriptionId::raw`].
    #[cfg_attr(not(feature = "wasm"), allow(dead_code))]
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[cfg_attr(not(feature = "wasm"), allow(dead_code))]
    pub(crate) fn raw(self) -> usize {
        self.0
    }
}

/// An owned design together with its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSnapshot {
    pub params: DesignParams,
    pub result: SimulationResult,
}

/// Single owner of the current design.
pub struct DesignStore {
    /// Current design
    params: DesignParams,
    /// Model settings used for every recompute
    config: SimulationConfig,
    /// Result for `params`, advice included
    last: SimulationResult,
    /// Subscribers in registration order
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: usize,
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DesignStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignStore")
            .field("params", &self.params)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DesignStore {
    /// Create a store holding the initial design.
    pub fn new() -> Self {
        Self::with_params(DesignParams::default())
    }

    /// Create a store holding `params`, simulated with the default config.
    pub fn with_params(params: DesignParams) -> Self {
        let config = SimulationConfig::default();
        let last = evaluate(&params, &config);
        Self {
            params,
            config,
            last,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a store with a custom simulation config.
    pub fn with_config(params: DesignParams, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let last = evaluate(&params, &config);
        Ok(Self {
            params,
            config,
            last,
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    /// Register a listener.
    ///
    /// The listener is called right away with the current design and
    /// result, and afterwards once per mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&DesignParams, &SimulationResult) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let mut listener: Listener = Box::new(listener);
        listener(&self.params, &self.last);
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Overwrite top-level fields.
    pub fn update(&mut self, patch: &DesignPatch) {
        let next = patch.apply(&self.params);
        self.commit(next);
    }

    /// Overwrite port fields.
    pub fn update_port(&mut self, patch: &PortPatch) {
        let mut next = self.params.clone();
        next.port = patch.apply(&self.params.port);
        self.commit(next);
    }

    /// Overwrite driver fields.
    pub fn update_driver(&mut self, patch: &DriverPatch) {
        let mut next = self.params.clone();
        next.driver = patch.apply(&self.params.driver);
        self.commit(next);
    }

    /// Swap in a driver from the catalog.
    ///
    /// An unknown name leaves the design untouched and notifies nobody.
    pub fn select_driver(&mut self, name: &str) -> Result<()> {
        let spec = drivers::find(name).ok_or_else(|| EnclosureError::unknown_driver(name))?;
        log::info!("selected driver {}", spec.name);

        let mut next = self.params.clone();
        next.driver = spec.to_params();
        self.commit(next);
        Ok(())
    }

    /// Apply the presets for a project context.
    pub fn set_project_context(&mut self, application: ApplicationType, speaker: SpeakerType) {
        log::info!("project context: {application} / {speaker}");
        let next = apply_project_context(&self.params, application, speaker);
        self.commit(next);
    }

    /// Replace the simulation config and recompute.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.recompute();
        Ok(())
    }

    /// A copy of the current design.
    pub fn current(&self) -> DesignParams {
        self.params.clone()
    }

    /// A copy of the latest result.
    pub fn result(&self) -> SimulationResult {
        self.last.clone()
    }

    /// A copy of the current design and its result.
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot {
            params: self.params.clone(),
            result: self.last.clone(),
        }
    }

    /// The active simulation config.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn commit(&mut self, next: DesignParams) {
        self.params = next;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.last = evaluate(&self.params, &self.config);
        log::debug!(
            "recomputed {} design: net {:.2} L, {} warning(s), {} advice, {} listener(s)",
            self.params.box_type,
            self.last.net_total,
            self.last.warnings.len(),
            self.last.advice.len(),
            self.listeners.len()
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.params, &self.last);
        }
    }
}

/// Simulate, then attach advice.
fn evaluate(params: &DesignParams, config: &SimulationConfig) -> SimulationResult {
    let mut result = calculate_with(params, config);
    result.advice = analyze(params, &result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{BoxType, BracingType, PortType};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_result_exists() {
        let store = DesignStore::new();
        let r = store.result();
        assert!(r.gross_volume > 0.0);
        assert!(!r.frequency_response.is_empty());
        assert_eq!(store.current(), DesignParams::default());
    }

    #[test]
    fn test_subscribe_replays_last_result() {
        let mut store = DesignStore::new();
        store.update(&DesignPatch::new().with_width(50.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |p, r| sink.borrow_mut().push((p.width, r.gross_volume)));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 50.0);
        assert_eq!(seen[0].1, store.result().gross_volume);
    }

    #[test]
    fn test_every_mutation_notifies_once() {
        let mut store = DesignStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(move |_, _| *counter.borrow_mut() += 1);
        assert_eq!(*calls.borrow(), 1);

        store.update(&DesignPatch::new().with_height(70.0));
        store.update_port(&PortPatch::new().with_tuning_freq(32.0));
        store.update_driver(&DriverPatch::new().with_xmax(18.0));
        store.set_project_context(ApplicationType::HifiHome, SpeakerType::Bookshelf);
        assert_eq!(*calls.borrow(), 5);

        // an empty patch still recomputes and notifies
        store.update(&DesignPatch::new());
        assert_eq!(*calls.borrow(), 6);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut store = DesignStore::new();
        let view = Rc::new(RefCell::new(0.0));
        let log = Rc::new(RefCell::new(Vec::new()));

        let (v, l) = (Rc::clone(&view), Rc::clone(&log));
        store.subscribe(move |p, _| {
            *v.borrow_mut() = p.depth;
            l.borrow_mut().push("first");
        });
        let (v, l) = (Rc::clone(&view), Rc::clone(&log));
        store.subscribe(move |p, _| {
            // the first listener already updated the shared view
            assert_eq!(*v.borrow(), p.depth);
            l.borrow_mut().push("second");
        });

        log.borrow_mut().clear();
        store.update(&DesignPatch::new().with_depth(44.0));
        assert_eq!(*log.borrow(), ["first", "second"]);
        assert_eq!(*view.borrow(), 44.0);
    }

    #[test]
    fn test_current_is_a_copy() {
        let mut store = DesignStore::new();
        let mut copy = store.current();
        copy.width = 999.0;
        copy.port.count = 7;
        assert_eq!(store.current().width, 45.0);
        assert_eq!(store.current().port.count, 1);

        store.update(&DesignPatch::new().with_width(50.0));
        assert_eq!(copy.width, 999.0);
    }

    #[test]
    fn test_result_reflects_each_update() {
        let mut store = DesignStore::new();
        store.update(&DesignPatch::new().with_box_type(BoxType::Sealed));
        let r = store.result();
        assert_eq!(r.port_length, 0.0);
        assert!(r.port_velocity.iter().all(|p| p.y == 0.0));

        store.update_port(&PortPatch::new().with_type(PortType::Slot));
        assert_eq!(store.current().port.port_type, PortType::Slot);
        assert_eq!(store.current().port.tuning_freq, 36.0);
    }

    #[test]
    fn test_advice_is_attached() {
        let mut store = DesignStore::new();
        store.set_project_context(ApplicationType::CarAudio, SpeakerType::Tower);
        store.update(&DesignPatch::new().with_bracing_type(BracingType::None));
        let r = store.result();
        assert!(r.advice.iter().any(|a| a.message.contains("bracing is mandatory")));
    }

    #[test]
    fn test_project_context() {
        let mut store = DesignStore::new();
        store.set_project_context(ApplicationType::Studio, SpeakerType::Soundbar);
        let p = store.current();
        assert_eq!((p.width, p.height, p.depth), (100.0, 12.0, 12.0));
        assert_eq!(p.box_type, BoxType::Sealed);
        assert_eq!(p.thickness, 25.0);
        assert_eq!(p.bracing_type, BracingType::Cross);
        assert_eq!(p.application, ApplicationType::Studio);
    }

    #[test]
    fn test_select_driver() {
        let mut store = DesignStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.select_driver("B&C 18TBW100 (Pro Audio)").unwrap();
        assert_eq!(store.current().driver.sd, 1210.0);
        assert_eq!(*calls.borrow(), 2);

        let err = store.select_driver("Mystery 15").unwrap_err();
        assert!(matches!(err, EnclosureError::UnknownDriver { .. }));
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(store.current().driver.sd, 1210.0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = DesignStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_, _| *counter.borrow_mut() += 1);
        store.subscribe(|_, _| {});

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.listener_count(), 1);

        store.update(&DesignPatch::new().with_width(40.0));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let mut store = DesignStore::new();
        let first = store.subscribe(|_, _| {});
        let second = store.subscribe(|_, _| {});
        assert_ne!(first, second);

        // exported ids come back as the same handle
        assert_eq!(SubscriptionId::from_raw(second.raw()), second);
        assert!(store.unsubscribe(SubscriptionId::from_raw(first.raw())));
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_config() {
        let bad = SimulationConfig::new().with_drive_power(-1.0);
        assert!(DesignStore::with_config(DesignParams::default(), bad.clone()).is_err());

        let quiet = SimulationConfig::new().with_drive_power(50.0);
        let mut store = DesignStore::with_config(DesignParams::default(), quiet).unwrap();
        let quiet_peak = store.result().port_velocity.peak();

        assert!(store.set_config(bad).is_err());
        assert_eq!(store.config().drive_power, 50.0);

        store.set_config(SimulationConfig::default()).unwrap();
        assert!(store.result().port_velocity.peak() > quiet_peak);
    }

    #[test]
    fn test_degenerate_edit_keeps_store_usable() {
        let mut store = DesignStore::new();
        store.update(&DesignPatch::new().with_width(3.0));
        assert_eq!(store.result().warnings.len(), 1);
        assert_eq!(store.result().net_total, 0.0);

        store.update(&DesignPatch::new().with_width(45.0));
        assert!(store.result().net_total > 0.0);
    }
}
