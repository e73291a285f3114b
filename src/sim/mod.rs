//! Interaction core
//!
//! All prompt logic lives here. This module must stay pure and reproducible:
//! - Injected RNG only (seeded `Pcg32` by default)
//! - Caller-supplied timestamps, never a clock
//! - Stable particle order (by sequence number)
//! - No rendering or platform dependencies

pub mod escalation;
pub mod machine;
pub mod particles;
pub mod placer;
pub mod state;

pub use escalation::{StatusBand, accept_scale, shows_stop_badge, status_band};
pub use machine::{InputEvent, InteractionMachine, Observer};
pub use particles::{
    ParticleId, ParticleItem, ParticleKind, ParticleLifecycle, SpawnParams, SweepSchedule,
};
pub use placer::{Measurement, Size, place, place_measured};
pub use state::{InteractionState, Phase, RngState, Snapshot};
