// Crate-level lints: allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in geometry calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::module_name_repetitions)] // PanelConfig in config, PanelView in view

//! Room panel engine for a small wall-mounted touch display.
//!
//! The engine turns a JSON room configuration plus a live entity-state feed
//! into per-frame views of a fixed 960x480 stage: a title/subtitle header, a
//! main room icon or an embedded center control, a status badge driven by
//! temperature/humidity thresholds, and a fixed 2x4 grid of tap buttons.
//!
//! # Architecture
//!
//! Everything stateful funnels through [`coordinator::RenderCoordinator`]:
//!
//! 1. The host feeds it configuration ([`config::normalize`]), live state
//!    ([`state::LiveState`]), viewport sizes, and taps.
//! 2. Each [`coordinator::RenderCoordinator::render`] call projects a pure
//!    [`view::PanelView`] and, at most, one center-control
//!    [`center::ConstructionRequest`] for the host to service.
//! 3. The [`widgets`] module draws a `PanelView` onto any
//!    `DrawTarget<Color = Rgb888>` in stage coordinates;
//!    [`geometry::StageTransform`] maps real viewports onto the stage.
//!
//! The engine never talks to a backend: commands, navigation, and dialog
//! requests go through the traits in [`dispatch`], and the center control
//! itself is an opaque host widget behind [`center::EmbeddedControl`].
//!
//! # Why a fixed stage
//!
//! The target device class has one hardware shape. Laying out against a
//! constant 960x480 stage keeps every position a compile-time constant (see
//! [`layout`]) and reduces responsive behavior to a single cover-fit
//! transform, computed only when the viewport actually changes.

pub mod center;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod errors;
pub mod geometry;
pub mod layout;
pub mod slots;
pub mod state;
pub mod status;
pub mod styles;
pub mod view;
pub mod widgets;

pub use center::{CenterHandle, ConstructionRequest, EmbeddedControl};
pub use config::{PanelConfig, normalize};
pub use coordinator::RenderCoordinator;
pub use errors::{ConfigError, ConstructionError};
pub use state::{EntityState, LiveState};
pub use view::{CenterView, PanelView};
