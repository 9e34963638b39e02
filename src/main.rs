//! Room panel simulator.
//!
//! Runs the panel engine against a stage-sized simulator window with a fake
//! live-state feed: temperature and humidity drift on slow sine waves so the
//! subtitle and the threshold badge exercise themselves, and the kitchen
//! light toggles whenever its button dispatches.
//!
//! Controls:
//! - Mouse click: tap (hit-tests the button grid through the stage transform)
//! - Close window: quit
//!
//! `RUST_LOG=debug` shows dispatch and lifecycle decisions.

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::info;
use serde_json::{Map, Value, json};

use room_panel::center::ControlNode;
use room_panel::dispatch::{CommandBus, EventSurface, Navigation};
use room_panel::layout::{STAGE_HEIGHT, STAGE_WIDTH};
use room_panel::widgets;
use room_panel::{EmbeddedControl, EntityState, LiveState, RenderCoordinator};

/// Target frame rate. The panel is nearly static; 30 fps is plenty.
const FRAME_TIME: Duration = Duration::from_millis(33);

// =============================================================================
// Host Stand-ins
// =============================================================================

/// Center control stand-in: remembers its descriptor, counts state pushes.
#[derive(Debug)]
struct SimCenterControl {
    descriptor: Value,
    nodes: Vec<ControlNode>,
}

impl SimCenterControl {
    fn new(descriptor: Value) -> Self {
        Self {
            descriptor,
            // Real widgets ship their own more-info affordance; model that
            nodes: vec![ControlNode::new("body"), ControlNode::new(room_panel::center::MORE_INFO_AFFORDANCE)],
        }
    }
}

impl EmbeddedControl for SimCenterControl {
    fn push_state(&mut self, _state: &LiveState) {}

    fn walk_nodes(&mut self, visit: &mut dyn FnMut(&mut ControlNode)) {
        for node in &mut self.nodes {
            visit(node);
        }
    }
}

/// Command bus that logs and mirrors toggles back into the fake state feed.
#[derive(Debug, Default)]
struct SimHost {
    toggled_entities: Vec<String>,
}

impl CommandBus for SimHost {
    fn call_service(&mut self, domain: &str, service: &str, data: &Map<String, Value>) {
        info!("service call: {domain}.{service} {data:?}");
        if service == "toggle" {
            if let Some(Value::String(entity)) = data.get("entity_id") {
                self.toggled_entities.push(entity.clone());
            }
        }
    }
}

impl EventSurface for SimHost {
    fn request_more_info(&mut self, entity: &str) {
        info!("more-info requested for {entity}");
    }

    fn notify_location_changed(&mut self) {
        info!("location changed");
    }
}

impl Navigation for SimHost {
    fn navigate(&mut self, path: &str) {
        info!("navigate to {path}");
    }
}

// =============================================================================
// Demo Data
// =============================================================================

fn demo_config() -> Value {
    json!({
        "title": "Living Room",
        "env_temp_entity": "sensor.living_temp",
        "env_humidity_entity": "sensor.living_humidity",
        "badge": { "mode": "temp_humidity_thresholds" },
        "center_preset": "light",
        "center_entity": "light.living_main",
        "buttons": [
            { "label": "Main Light", "icon": "mdi:lightbulb", "entity": "light.living_main",
              "tap": { "action": "toggle" } },
            { "label": "Fan", "icon": "mdi:fan", "entity": "fan.living",
              "tap": { "action": "toggle" } },
            { "label": "Temp", "icon": "mdi:thermometer", "entity": "sensor.living_temp",
              "tap": { "action": "more-info" } },
            { "label": "Scenes", "icon": "mdi:palette",
              "tap": { "action": "navigate", "navigation_path": "/lovelace/scenes" } },
            { "label": "Movie", "icon": "mdi:movie", "icon_color": "orange",
              "tap": { "action": "call-service", "service": "script.movie_mode" } },
            { "label": "Broken", "icon": "mdi:alert", "disabled": true,
              "tap": { "action": "toggle" }, "entity": "switch.broken" },
        ],
    })
}

/// Slow sine drift so the badge crosses its thresholds over ~90 seconds.
fn fake_environment(t: f32) -> (i32, i32) {
    let temp = 22.0 + 6.0 * (t * 0.07).sin();
    let humidity = 50.0 + 15.0 * (t * 0.05).cos();
    (temp as i32, humidity as i32)
}

// =============================================================================
// Main Loop
// =============================================================================

fn main() {
    env_logger::init();

    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(STAGE_WIDTH, STAGE_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Room Panel Sim", &output_settings);

    // First update before polling events
    display.clear(room_panel::styles::BLACK).ok();
    window.update(&display);

    let mut coordinator: RenderCoordinator<SimCenterControl> = RenderCoordinator::new();
    coordinator
        .set_config(&demo_config())
        .expect("demo configuration is well-formed");
    coordinator.set_viewport(STAGE_WIDTH, STAGE_HEIGHT);

    let mut host = SimHost::default();
    let mut light_on = false;
    let mut t = 0.0f32;

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let mut surface = SimHost::default();
                    let mut nav = SimHost::default();
                    coordinator.tap_at(point, &mut host, &mut surface, &mut nav);
                }
                _ => {}
            }
        }

        // Mirror dispatched toggles back into the fake state feed
        for entity in host.toggled_entities.drain(..) {
            if entity == "light.living_main" {
                light_on = !light_on;
            }
        }

        let (temp, humidity) = fake_environment(t);
        coordinator.update_entity("sensor.living_temp", EntityState::new(temp.to_string()));
        coordinator.update_entity("sensor.living_humidity", EntityState::new(humidity.to_string()));
        coordinator.update_entity(
            "light.living_main",
            EntityState::new(if light_on { "on" } else { "off" }),
        );

        let (view, request) = coordinator.render();
        if let Some(request) = request {
            // The simulator constructs widgets synchronously
            let widget = SimCenterControl::new(request.descriptor.clone());
            info!("constructed center control: {}", widget.descriptor["type"]);
            coordinator.complete_construction(request.generation, Ok(widget));
            coordinator.notify_center_mutation();
        }
        coordinator.frame();

        display.clear(widgets::backdrop_color(view.overlay_opacity)).ok();
        widgets::draw_header(&mut display, &view);
        widgets::draw_center(&mut display, &view);
        widgets::draw_badge(&mut display, view.badge.as_ref());
        widgets::draw_buttons(&mut display, &view.slots);

        window.update(&display);

        t += FRAME_TIME.as_secs_f32();
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
