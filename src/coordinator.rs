//! Render coordinator: the single stateful object the host embeds.
//!
//! Owns the normalized configuration, the live-state snapshot, the viewport
//! tracker, and the center lifecycle, and sequences them into per-frame
//! [`PanelView`]s. The host drives it with four kinds of events
//! (configuration, live state, viewport size, input) and services the
//! construction requests it hands back.
//!
//! # Generations
//!
//! Every accepted configuration bumps the render generation. Construction
//! requests carry the generation they were issued under; a completion whose
//! generation no longer matches is dropped (see
//! [`crate::center::CenterLifecycle::adopt`]). Live-state ticks and resizes
//! do not bump the generation, so they never cancel an in-flight
//! construction.

use embedded_graphics::prelude::Point;
use log::{debug, info};
use serde_json::Value;

use crate::center::{CenterHandle, CenterLifecycle, ConstructionRequest, EmbeddedControl, resolve_descriptor};
use crate::config::{PanelConfig, normalize};
use crate::dispatch::{self, CommandBus, DispatchOutcome, EventSurface, Navigation};
use crate::errors::{ConfigError, ConstructionError};
use crate::geometry::{StageTransform, ViewportTracker};
use crate::slots;
use crate::state::{EntityState, LiveState};
use crate::view::{self, CenterView, PanelView};

// =============================================================================
// Coordinator
// =============================================================================

/// Host-embedded panel engine. `W` is the host's widget type for the center
/// control.
#[derive(Debug)]
pub struct RenderCoordinator<W> {
    config: PanelConfig,
    state: LiveState,
    viewport: ViewportTracker,
    center: CenterLifecycle<W>,
    generation: u64,
}

impl<W> Default for RenderCoordinator<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> RenderCoordinator<W> {
    /// Coordinator with the default configuration and no live state.
    pub fn new() -> Self {
        Self {
            config: PanelConfig::default(),
            state: LiveState::new(),
            viewport: ViewportTracker::new(),
            center: CenterLifecycle::new(),
            generation: 0,
        }
    }

    /// Current normalized configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current render generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the live-state snapshot wholesale.
    pub fn push_live_state(&mut self, state: LiveState) {
        self.state = state;
    }

    /// Update a single entity in place.
    pub fn update_entity(&mut self, entity_id: &str, state: EntityState) {
        self.state.insert(entity_id, state);
    }

    /// Observe the hosting viewport size. Returns `true` when the stage
    /// transform changed (the host should redraw).
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        self.viewport.observe(width, height)
    }

    /// Current stage-to-viewport transform.
    pub fn transform(&self) -> StageTransform {
        self.viewport.transform()
    }

    /// Host unmounted the panel: drop the center control and invalidate any
    /// in-flight construction. Configuration and live state survive a
    /// remount.
    pub fn detach(&mut self) {
        self.generation += 1;
        self.center.reset();
        debug!("panel detached, generation now {}", self.generation);
    }
}

impl<W: EmbeddedControl> RenderCoordinator<W> {
    /// Accept a raw configuration value.
    ///
    /// Normalization errors leave the previous configuration in place. An
    /// accepted configuration bumps the generation and resets the center
    /// lifecycle, so the next [`Self::render`] reconstructs from scratch and
    /// any construction still in flight resolves stale.
    pub fn set_config(&mut self, raw: &Value) -> Result<(), ConfigError> {
        let config = normalize(raw)?;
        self.generation += 1;
        self.center.reset();
        self.center.set_suppression(config.center_hide_more_info);
        info!("configuration accepted, generation {}", self.generation);
        self.config = config;
        Ok(())
    }

    /// Produce the view for one frame.
    ///
    /// Also reconciles the center lifecycle: the returned request, if any,
    /// must be handed to the host's widget construction and resolved through
    /// [`Self::complete_construction`].
    pub fn render(&mut self) -> (PanelView, Option<ConstructionRequest>) {
        let descriptor = resolve_descriptor(&self.config);
        let request = self
            .center
            .ensure(descriptor.as_ref(), &self.state, self.generation);

        let center = if descriptor.is_none() {
            CenterView::Placeholder
        } else {
            match self.center.handle() {
                Some(CenterHandle::Mounted(_)) => CenterView::Mounted {
                    scale: view::effective_center_scale(&self.config),
                },
                Some(CenterHandle::Failed) => CenterView::Failed,
                None => CenterView::Pending,
            }
        };

        (view::build_view(&self.config, &self.state, center), request)
    }

    /// Resolve a construction request issued by [`Self::render`].
    pub fn complete_construction(
        &mut self,
        generation: u64,
        result: Result<W, ConstructionError>,
    ) {
        self.center.adopt(generation, self.generation, result);
    }

    /// Structural mutation inside the center widget's subtree.
    pub fn notify_center_mutation(&mut self) {
        self.center.notify_mutation();
    }

    /// Display frame boundary: runs at most one affordance suppression pass.
    pub fn frame(&mut self) {
        self.center.run_suppression_pass();
    }

    /// Dispatch a tap on the slot at `index`, if occupied.
    pub fn tap(
        &mut self,
        index: usize,
        bus: &mut impl CommandBus,
        surface: &mut impl EventSurface,
        nav: &mut impl Navigation,
    ) -> DispatchOutcome {
        match self.config.buttons.get(index) {
            Some(button) => dispatch::dispatch(button, bus, surface, nav),
            None => DispatchOutcome::Skipped,
        }
    }

    /// Dispatch a tap at a viewport coordinate: map through the stage
    /// transform, hit-test the grid, dispatch the slot.
    pub fn tap_at(
        &mut self,
        viewport_point: Point,
        bus: &mut impl CommandBus,
        surface: &mut impl EventSurface,
        nav: &mut impl Navigation,
    ) -> DispatchOutcome {
        let stage_point = self.transform().to_stage(viewport_point);
        match slots::hit_test(&self.config.buttons, stage_point) {
            Some(index) => self.tap(index, bus, surface, nav),
            None => DispatchOutcome::Skipped,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::center::ControlNode;
    use crate::center::MORE_INFO_AFFORDANCE;
    use serde_json::{Map, json};

    #[derive(Debug, Default)]
    struct FakeControl {
        pushes: usize,
        nodes: Vec<ControlNode>,
    }

    impl EmbeddedControl for FakeControl {
        fn push_state(&mut self, _state: &LiveState) {
            self.pushes += 1;
        }

        fn walk_nodes(&mut self, visit: &mut dyn FnMut(&mut ControlNode)) {
            for node in &mut self.nodes {
                visit(node);
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordingHost {
        calls: Vec<(String, String)>,
        more_info: Vec<String>,
        paths: Vec<String>,
    }

    impl CommandBus for RecordingHost {
        fn call_service(&mut self, domain: &str, service: &str, _data: &Map<String, Value>) {
            self.calls.push((domain.into(), service.into()));
        }
    }

    impl EventSurface for RecordingHost {
        fn request_more_info(&mut self, entity: &str) {
            self.more_info.push(entity.into());
        }

        fn notify_location_changed(&mut self) {}
    }

    impl Navigation for RecordingHost {
        fn navigate(&mut self, path: &str) {
            self.paths.push(path.into());
        }
    }

    fn tap_at(
        rc: &mut RenderCoordinator<FakeControl>,
        p: Point,
        host: &mut RecordingHost,
    ) -> DispatchOutcome {
        let mut surface = RecordingHost::default();
        let mut nav = RecordingHost::default();
        let outcome = rc.tap_at(p, host, &mut surface, &mut nav);
        host.more_info.extend(surface.more_info);
        host.paths.extend(nav.paths);
        outcome
    }

    #[test]
    fn test_light_preset_end_to_end() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "light",
            "center_entity": "light.kitchen",
        }))
        .unwrap();

        let (view, request) = rc.render();
        assert_eq!(view.center, CenterView::Pending);
        let request = request.expect("light preset must request construction");
        assert_eq!(request.descriptor["type"], "light");
        assert_eq!(request.descriptor["name"], " ", "synthesized name is suppressed");

        rc.complete_construction(request.generation, Ok(FakeControl::default()));
        let (view, request) = rc.render();
        assert_eq!(
            view.center,
            CenterView::Mounted { scale: 1.25 },
            "mounted light preset renders at the light multiplier"
        );
        assert!(request.is_none(), "mounted key must not reconstruct");
    }

    #[test]
    fn test_no_center_is_placeholder() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({ "title": "Bedroom" })).unwrap();
        let (view, request) = rc.render();
        assert_eq!(view.center, CenterView::Placeholder);
        assert!(request.is_none());
        assert_eq!(view.title, "Bedroom");
    }

    #[test]
    fn test_config_change_invalidates_in_flight_construction() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "thermostat",
            "center_entity": "climate.x",
        }))
        .unwrap();
        let (_, request) = rc.render();
        let request = request.unwrap();

        // New configuration lands before the construction resolves
        rc.set_config(&json!({
            "center_preset": "media",
            "center_entity": "media_player.x",
        }))
        .unwrap();
        rc.complete_construction(request.generation, Ok(FakeControl::default()));

        let (view, new_request) = rc.render();
        assert_ne!(view.center, CenterView::Mounted { scale: 1.0 }, "stale widget must not mount");
        let new_request = new_request.expect("new configuration reconstructs");
        assert_eq!(new_request.descriptor["type"], "media-control");
    }

    #[test]
    fn test_rejected_config_keeps_previous() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({ "title": "Office" })).unwrap();
        let generation = rc.generation();

        assert_eq!(
            rc.set_config(&json!({ "buttons": 7 })),
            Err(ConfigError::ButtonsNotAList)
        );
        assert_eq!(rc.config().title, "Office", "rejected config leaves the old one live");
        assert_eq!(rc.generation(), generation, "rejected config must not bump the generation");
    }

    #[test]
    fn test_failed_construction_renders_error_placeholder() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "entity",
            "center_entity": "switch.x",
        }))
        .unwrap();
        let (_, request) = rc.render();
        rc.complete_construction(request.unwrap().generation, Err(ConstructionError("nope".into())));
        let (view, request) = rc.render();
        assert_eq!(view.center, CenterView::Failed);
        assert!(request.is_none(), "failure is terminal until the descriptor changes");
    }

    #[test]
    fn test_state_tick_does_not_reconstruct() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "light",
            "center_entity": "light.kitchen",
        }))
        .unwrap();
        let (_, request) = rc.render();
        rc.complete_construction(request.unwrap().generation, Ok(FakeControl::default()));

        rc.update_entity("light.kitchen", EntityState::new("on"));
        let (_, request) = rc.render();
        assert!(request.is_none(), "live-state ticks must not reconstruct the center");
        rc.update_entity("light.kitchen", EntityState::new("off"));
        let (_, request) = rc.render();
        assert!(request.is_none());
    }

    #[test]
    fn test_tap_at_maps_through_transform() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({ "buttons": [
            { "label": "Fan", "entity": "fan.bedroom", "tap": { "action": "toggle" } },
        ]}))
        .unwrap();
        rc.set_viewport(1920, 1080);

        let stage_point = slots::slot_rect(0).top_left + Point::new(5, 5);
        let viewport_point = rc.transform().to_viewport(stage_point);

        let mut host = RecordingHost::default();
        assert_eq!(tap_at(&mut rc, viewport_point, &mut host), DispatchOutcome::Dispatched);
        assert_eq!(host.calls, vec![("fan".to_string(), "toggle".to_string())]);
    }

    #[test]
    fn test_tap_at_empty_slot_skips() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({ "buttons": [{ "label": "Only" }] })).unwrap();
        rc.set_viewport(960, 480);

        let stage_point = slots::slot_rect(3).top_left + Point::new(5, 5);
        let viewport_point = rc.transform().to_viewport(stage_point);
        let mut host = RecordingHost::default();
        assert_eq!(tap_at(&mut rc, viewport_point, &mut host), DispatchOutcome::Skipped);
    }

    #[test]
    fn test_frame_runs_suppression() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "light",
            "center_entity": "light.kitchen",
        }))
        .unwrap();
        let (_, request) = rc.render();
        let widget = FakeControl {
            nodes: vec![ControlNode::new(MORE_INFO_AFFORDANCE)],
            ..FakeControl::default()
        };
        rc.complete_construction(request.unwrap().generation, Ok(widget));

        rc.notify_center_mutation();
        rc.frame();
        let (view, _) = rc.render();
        assert!(matches!(view.center, CenterView::Mounted { .. }));
        // The affordance itself is asserted hidden in the lifecycle tests;
        // here we only prove the wiring does not panic and stays mounted.
    }

    #[test]
    fn test_detach_reconstructs_on_next_render() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        rc.set_config(&json!({
            "center_preset": "thermostat",
            "center_entity": "climate.x",
        }))
        .unwrap();
        let (_, request) = rc.render();
        rc.complete_construction(request.unwrap().generation, Ok(FakeControl::default()));

        rc.detach();
        let (view, request) = rc.render();
        assert_eq!(view.center, CenterView::Pending);
        assert!(request.is_some(), "remount reconstructs the same descriptor");
        assert_eq!(rc.config().center_entity, "climate.x", "configuration survives detach");
    }

    #[test]
    fn test_viewport_change_reports_redraw() {
        let mut rc: RenderCoordinator<FakeControl> = RenderCoordinator::new();
        assert!(rc.set_viewport(1280, 800));
        assert!(!rc.set_viewport(1280, 800));
        assert!(rc.set_viewport(960, 480));
    }
}
