//! Error taxonomy for the panel engine.
//!
//! Three failure classes exist and they never mix:
//! - [`ConfigError`]: malformed configuration shape, raised synchronously at
//!   the normalization boundary and fatal for that configuration application.
//! - [`ConstructionError`]: failure inside the asynchronous widget
//!   construction boundary, recovered locally into an inline error
//!   placeholder, logged, never propagated.
//! - Dispatch skips are not errors at all; see
//!   [`DispatchOutcome`](crate::dispatch::DispatchOutcome).

use thiserror::Error;

/// Fatal configuration shape errors.
///
/// Everything else about a configuration is coerced or defaulted; only these
/// three shapes reject the whole configuration application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration object was supplied.
    #[error("missing configuration object")]
    Missing,

    /// `buttons` was present but not a list.
    #[error("'buttons' must be a list")]
    ButtonsNotAList,

    /// `center_card` was present but neither an object nor null.
    #[error("'center_card' must be an object or null")]
    CenterCardNotAnObject,
}

/// Failure reported by the host widget-construction service.
///
/// Terminal for the current cache key: the panel shows an inline error
/// placeholder until the center descriptor changes again. There is no retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("center control construction failed: {0}")]
pub struct ConstructionError(pub String);
