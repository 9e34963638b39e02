//! Live entity state snapshot supplied by the host platform.
//!
//! The host pushes a wholesale key→value snapshot on every state tick. The
//! engine treats it as opaque: it reads entity states to derive the subtitle
//! and badge, feeds it into the mounted center control, and never mutates it.
//!
//! # Numeric Coercion
//!
//! Sensor states arrive as strings (`"21.4"`, `"unknown"`, `"on"`). Two
//! different coercions exist on purpose:
//! - [`parse_leading_int`] with a `0` fallback for subtitle display, so a
//!   missing sensor still renders a stable `0ºC` part.
//! - [`reading`] returning `Option<i32>` for badge thresholds, so an absent
//!   or malformed value can never satisfy a threshold comparison.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Entity State
// =============================================================================

/// State and attributes of a single entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Primary state string (e.g. `"21.4"`, `"on"`, `"unknown"`).
    pub state: String,

    /// Free-form attribute bag. Opaque to the engine, forwarded to the
    /// center control untouched.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    /// Build a state with no attributes.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
        }
    }
}

// =============================================================================
// Live State Store
// =============================================================================

/// Wholesale entity snapshot for one state tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveState {
    entities: HashMap<String, EntityState>,
}

impl LiveState {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entity. Used by hosts and tests to build
    /// snapshots; the engine itself never writes here.
    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.entities.insert(entity_id.into(), state);
    }

    /// Look up one entity.
    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.entities.get(entity_id)
    }

    /// State string for an entity, `"unknown"` when absent.
    ///
    /// Mirrors the host platform convention of reporting missing entities as
    /// the `unknown` state rather than failing.
    pub fn state_str(&self, entity_id: &str) -> &str {
        self.get(entity_id).map_or("unknown", |e| e.state.as_str())
    }

    /// Integer reading for a threshold comparison.
    ///
    /// Returns `None` when `entity_id` is empty, the entity is missing, or
    /// the state has no leading integer. `None` never matches a threshold.
    pub fn reading(&self, entity_id: &str) -> Option<i32> {
        if entity_id.is_empty() {
            return None;
        }
        parse_leading_int(self.state_str(entity_id))
    }

    /// Number of entities in the snapshot.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parse the leading integer of a string, `parseInt`-style.
///
/// Accepts optional surrounding whitespace and a sign, then consumes leading
/// digits and ignores the rest: `"21.6"` → `21`, `"-5.2c"` → `-5`.
/// Returns `None` when no digit is found.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs
    let value = digits.parse::<i64>().unwrap_or(i64::from(i32::MAX));
    let value = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some(if negative { -value } else { value })
}

/// Parse the leading integer with a fallback for display coercion.
pub fn parse_leading_int_or(s: &str, fallback: i32) -> i32 {
    parse_leading_int(s).unwrap_or(fallback)
}

// =============================================================================
// Unit Tests
// =============================================================================
