//! Center control lifecycle: descriptor resolution, construction caching,
//! generation-checked adoption, and more-info affordance suppression.
//!
//! The center control is the one dynamically-instantiated child widget the
//! panel hosts (a thermostat card, a light card, ...). Its construction is
//! asynchronous on the host side and can race with newer configuration, so
//! every request carries the render generation it was issued under and a
//! completion is adopted only if that generation is still current. Stale
//! results are discarded silently; they are never an error.
//!
//! # Ownership
//!
//! [`CenterLifecycle`] is the only owner of the handle: it alone attaches,
//! replaces, and detaches. The coordinator may only push live state into the
//! mounted widget (via [`CenterLifecycle::ensure`]).
//!
//! # Failure
//!
//! Construction failure is terminal for the current cache key: the handle
//! becomes [`CenterHandle::Failed`] and stays that way until the descriptor
//! changes. The failure is logged at `warn` and never escalates; the
//! surrounding panel keeps rendering.

use log::{debug, warn};
use serde_json::{Value, json};

use crate::config::{CenterPreset, PanelConfig};
use crate::errors::ConstructionError;
use crate::state::LiveState;

// =============================================================================
// Descriptor Resolution
// =============================================================================

/// Resolve the center-control specification into a concrete descriptor.
///
/// A literal `center_card` wins verbatim. Otherwise a preset plus a
/// non-empty entity synthesizes a descriptor from the fixed preset table;
/// anything else resolves to no center control.
///
/// Synthesized descriptors always suppress the embedded widget's own
/// name/title (a hard product rule, not user-configurable): a single-space
/// name renders blank without triggering the widget's automatic naming.
pub fn resolve_descriptor(cfg: &PanelConfig) -> Option<Value> {
    if let Some(literal) = &cfg.center_card {
        return Some(literal.clone());
    }

    let entity = cfg.center_entity.as_str();
    if entity.is_empty() {
        return None;
    }

    match cfg.center_preset {
        CenterPreset::None => None,
        CenterPreset::Thermostat => {
            Some(json!({ "type": "thermostat", "entity": entity, "name": " " }))
        }
        CenterPreset::Light => Some(json!({ "type": "light", "entity": entity, "name": " " })),
        CenterPreset::Media => Some(json!({ "type": "media-control", "entity": entity })),
        // Fan and the generic preset share the single-row entities card
        CenterPreset::Fan | CenterPreset::Entity => Some(json!({
            "type": "entities",
            "show_header_toggle": false,
            "title": " ",
            "entities": [{ "entity": entity, "name": " " }],
        })),
    }
}

// =============================================================================
// Widget Abstraction
// =============================================================================

/// Role string marking a more-info affordance inside the widget subtree.
pub const MORE_INFO_AFFORDANCE: &str = "more-info";

/// One element of the embedded widget's rendering subtree, as exposed to the
/// suppression pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlNode {
    /// Element role (affordances are matched on this).
    pub role: String,
    /// Whether the element is currently shown.
    pub visible: bool,
    /// Whether the element accepts pointer/keyboard interaction.
    pub interactive: bool,
}

impl ControlNode {
    /// Visible, interactive node with the given role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            visible: true,
            interactive: true,
        }
    }
}

/// Host-constructed embedded widget, opaque to the engine beyond this
/// surface.
pub trait EmbeddedControl {
    /// Feed the latest live-state snapshot into the widget.
    fn push_state(&mut self, state: &LiveState);

    /// Walk every node of the rendering subtree, recursing into nested
    /// encapsulated scopes. The suppression pass uses this to reach
    /// affordances the panel does not own.
    fn walk_nodes(&mut self, visit: &mut dyn FnMut(&mut ControlNode));
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Construction request handed to the host widget-construction service.
///
/// The host resolves it (asynchronously, possibly failing) and reports back
/// through [`crate::coordinator::RenderCoordinator::complete_construction`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructionRequest {
    /// JSON-serializable descriptor for the widget to build.
    pub descriptor: Value,
    /// Render generation the request was issued under.
    pub generation: u64,
}

/// Mounted state of the center control.
#[derive(Debug)]
pub enum CenterHandle<W> {
    /// A live widget, attached to the panel's tree.
    Mounted(W),
    /// Terminal inline error placeholder for the current cache key.
    Failed,
}

/// Owns the single embedded control: caching, replacement, teardown,
/// affordance suppression.
#[derive(Debug)]
pub struct CenterLifecycle<W> {
    /// Current handle, if any construction has completed for the key.
    handle: Option<CenterHandle<W>>,
    /// Structural cache key: the resolved descriptor of the current handle
    /// (or in-flight request). Compared by value, not by serialization.
    key: Option<Value>,
    /// Whether a construction request is outstanding for `key`.
    in_flight: bool,
    /// Affordance suppression enabled (config flag). When false no
    /// mutation observation happens at all.
    suppress_affordances: bool,
    /// Coalescing flag: at most one suppression pass per display frame.
    suppression_pending: bool,
}

impl<W> Default for CenterLifecycle<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> CenterLifecycle<W> {
    /// Empty lifecycle, suppression on (the configuration default).
    pub fn new() -> Self {
        Self {
            handle: None,
            key: None,
            in_flight: false,
            suppress_affordances: true,
            suppression_pending: false,
        }
    }

    /// Enable/disable affordance suppression. Disabling also drops any
    /// pending pass (the observer is simply not installed).
    pub fn set_suppression(&mut self, enabled: bool) {
        self.suppress_affordances = enabled;
        if !enabled {
            self.suppression_pending = false;
        }
    }

    /// Current handle, if any.
    pub fn handle(&self) -> Option<&CenterHandle<W>> {
        self.handle.as_ref()
    }

    /// Whether a construction is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Detach and discard everything (host unmounted the panel, or a new
    /// configuration arrived). The next `ensure` starts from scratch.
    pub fn reset(&mut self) {
        self.handle = None;
        self.key = None;
        self.in_flight = false;
        self.suppression_pending = false;
    }
}

impl<W: EmbeddedControl> CenterLifecycle<W> {
    /// Reconcile the lifecycle against the resolved descriptor.
    ///
    /// Same cache key: the existing handle is reused and just re-fed the
    /// latest live state; no request is issued (including while a
    /// construction for that key is already in flight). Different key: the
    /// old handle is detached immediately and a construction request for the
    /// new descriptor is returned, tagged with `generation`.
    pub fn ensure(
        &mut self,
        descriptor: Option<&Value>,
        state: &LiveState,
        generation: u64,
    ) -> Option<ConstructionRequest> {
        if self.key.as_ref() == descriptor && (self.handle.is_some() || self.in_flight) {
            if let Some(CenterHandle::Mounted(widget)) = self.handle.as_mut() {
                widget.push_state(state);
            }
            return None;
        }

        // Key changed: detach the old handle and stop observing it
        self.key = descriptor.cloned();
        self.handle = None;
        self.in_flight = false;
        self.suppression_pending = false;

        let descriptor = descriptor?;
        self.in_flight = true;
        Some(ConstructionRequest {
            descriptor: descriptor.clone(),
            generation,
        })
    }

    /// Adopt a completed construction.
    ///
    /// `generation` is the value captured at request time, `current` the
    /// coordinator's live counter; a mismatch means newer configuration won
    /// the race and the result is discarded silently. Failures mount the
    /// terminal error placeholder and log a warning; the panel never fails.
    pub fn adopt(&mut self, generation: u64, current: u64, result: Result<W, ConstructionError>) {
        if generation != current {
            debug!("discarding stale center construction (generation {generation}, current {current})");
            return;
        }
        self.in_flight = false;
        match result {
            Ok(widget) => {
                self.handle = Some(CenterHandle::Mounted(widget));
                // Initial pass right after attach
                if self.suppress_affordances {
                    self.suppression_pending = true;
                }
            }
            Err(err) => {
                warn!("center control failed to load: {err}");
                self.handle = Some(CenterHandle::Failed);
            }
        }
    }

    /// Structural mutation observed inside the widget subtree. Coalesced:
    /// bursts set one pending flag, resolved by the next
    /// [`Self::run_suppression_pass`]. A no-op when suppression is disabled
    /// (no observer installed) or nothing is mounted.
    pub fn notify_mutation(&mut self) {
        if self.suppress_affordances && matches!(self.handle, Some(CenterHandle::Mounted(_))) {
            self.suppression_pending = true;
        }
    }

    /// Run at most one suppression pass. Called once per display frame by
    /// the coordinator; idempotent and safe to reapply unboundedly.
    pub fn run_suppression_pass(&mut self) {
        if !self.suppression_pending {
            return;
        }
        self.suppression_pending = false;
        if !self.suppress_affordances {
            return;
        }
        if let Some(CenterHandle::Mounted(widget)) = self.handle.as_mut() {
            widget.walk_nodes(&mut |node| {
                if node.role == MORE_INFO_AFFORDANCE {
                    node.visible = false;
                    node.interactive = false;
                }
            });
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
