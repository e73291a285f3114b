//! Valentine Prompt - a yes/no question that really wants a yes
//!
//! Core modules:
//! - `sim`: Seeded interaction core (placement, escalation, particles, state machine)
//! - `assets`: Fixed media asset sets the core indexes into
//! - `settings`: Tunables and presentation copy
//! - `web`: wasm-bindgen host for browser renderers (wasm32 only)

pub mod assets;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use assets::{AssetError, AssetRef, AssetRegistry};
pub use settings::{Settings, SettingsError, Wording};
pub use sim::{InputEvent, InteractionMachine, Measurement, Size, Snapshot};

/// Interaction constants
pub mod consts {
    /// Accept-control growth per decline
    pub const ACCEPT_SCALE_STEP: f32 = 0.5;
    /// Hard ceiling on accept-control growth
    pub const ACCEPT_SCALE_MAX: f32 = 8.0;

    /// Particles older than this are swept (milliseconds)
    pub const PARTICLE_EXPIRY_MS: f64 = 6000.0;

    /// Celebration burst size on accept
    pub const CELEBRATION_BURST: usize = 70;
    /// Largest burst a config may ask for
    pub const MAX_CELEBRATION_BURST: usize = 500;
    /// Celebration spawn ranges
    pub const CELEBRATION_X_PCT: (f32, f32) = (0.0, 100.0);
    pub const CELEBRATION_DURATION_SECS: (f32, f32) = (1.2, 3.7);
    pub const CELEBRATION_DELAY_SECS: (f32, f32) = (0.0, 1.5);
    pub const CELEBRATION_SCALE: (f32, f32) = (0.4, 2.0);

    /// Protest spawn ranges
    pub const PROTEST_X_PCT: (f32, f32) = (10.0, 90.0);
    pub const PROTEST_DURATION_SECS: (f32, f32) = (2.0, 4.0);

    /// Decline control shows a stop badge past this many declines
    pub const STOP_BADGE_AFTER: u32 = 5;

    /// Default interaction-area padding (pixels)
    pub const PLACEMENT_PADDING: f32 = 20.0;
    /// Decline control size used when the host can't measure it (pixels)
    pub const DECLINE_CONTROL_SIZE: (f32, f32) = (100.0, 44.0);
}

/// Draw uniformly from `[lo, hi]` given a unit sample in `[0, 1)`.
///
/// Collapses to `lo` when the range is empty or inverted.
#[inline]
pub fn lerp_range(range: (f32, f32), unit: f32) -> f32 {
    let (lo, hi) = range;
    lo + (hi - lo).max(0.0) * unit
}
