//! Tap action dispatch against host-provided surfaces.
//!
//! The engine never talks to a backend directly; everything interactive goes
//! through the three small traits below, implemented by the host. Dispatch
//! is deliberately forgiving: malformed or underspecified actions skip
//! silently instead of erroring, because a tap is the worst possible moment
//! to surface a configuration mistake.

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::config::{ButtonConfig, TapAction};

// =============================================================================
// Host Surfaces
// =============================================================================

/// Outbound command channel to the backend.
pub trait CommandBus {
    /// Invoke `domain.service` with a JSON payload.
    fn call_service(&mut self, domain: &str, service: &str, data: &Map<String, Value>);
}

/// Host UI surface (detail dialogs and location notifications).
pub trait EventSurface {
    /// Ask the host to open its detail view for an entity.
    fn request_more_info(&mut self, entity: &str);

    /// Tell the host the navigation location changed (fired after a path is
    /// pushed, so sibling views can react).
    fn notify_location_changed(&mut self);
}

/// Host navigation history.
pub trait Navigation {
    /// Push a path onto the navigation history.
    fn navigate(&mut self, path: &str);
}

// =============================================================================
// Dispatch
// =============================================================================

/// Result of a tap: either exactly one host interaction happened, or none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// One command/navigation/dialog request was issued.
    Dispatched,
    /// Nothing happened (inert action, disabled button, or missing pieces).
    Skipped,
}

/// Dispatch a button tap.
///
/// Exactly one of the five action kinds runs, or nothing does. Disabled
/// buttons always skip. The individual skip conditions:
/// - toggle / more-info with a blank entity
/// - navigate with an empty path
/// - call-service whose identifier does not start with two non-empty
///   dot-separated segments
pub fn dispatch(
    button: &ButtonConfig,
    bus: &mut impl CommandBus,
    surface: &mut impl EventSurface,
    nav: &mut impl Navigation,
) -> DispatchOutcome {
    if button.disabled {
        trace!("tap on disabled button '{}' skipped", button.label);
        return DispatchOutcome::Skipped;
    }

    match &button.tap {
        TapAction::None => DispatchOutcome::Skipped,
        TapAction::Toggle => {
            let Some((domain, _)) = split_entity(&button.entity) else {
                debug!("toggle tap without a usable entity, skipping");
                return DispatchOutcome::Skipped;
            };
            bus.call_service(domain, "toggle", &toggle_payload(&button.entity));
            DispatchOutcome::Dispatched
        }
        TapAction::MoreInfo => {
            if button.entity.is_empty() {
                debug!("more-info tap without an entity, skipping");
                return DispatchOutcome::Skipped;
            }
            surface.request_more_info(&button.entity);
            DispatchOutcome::Dispatched
        }
        TapAction::Navigate { navigation_path } => {
            if navigation_path.is_empty() {
                debug!("navigate tap without a path, skipping");
                return DispatchOutcome::Skipped;
            }
            nav.navigate(navigation_path);
            surface.notify_location_changed();
            DispatchOutcome::Dispatched
        }
        TapAction::CallService { service, data } => {
            let Some((domain, name)) = split_service(service) else {
                debug!("call-service tap with malformed identifier '{service}', skipping");
                return DispatchOutcome::Skipped;
            };
            bus.call_service(domain, name, data);
            DispatchOutcome::Dispatched
        }
    }
}

/// Split an entity id on its first `.`. Both halves must be non-empty; a
/// toggle on a domainless entity is meaningless.
fn split_entity(entity: &str) -> Option<(&str, &str)> {
    let (domain, rest) = entity.split_once('.')?;
    (!domain.is_empty() && !rest.is_empty()).then_some((domain, rest))
}

/// Split a `domain.service` identifier. Only the first two dot-separated
/// segments count; anything after a second `.` is dropped.
fn split_service(service: &str) -> Option<(&str, &str)> {
    let mut segments = service.split('.');
    let domain = segments.next()?;
    let name = segments.next()?;
    (!domain.is_empty() && !name.is_empty()).then_some((domain, name))
}

fn toggle_payload(entity: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("entity_id".into(), Value::String(entity.into()));
    data
}

// =============================================================================
// Unit Tests
// =============================================================================
