//! Interaction state and the read-only snapshot handed to renderers
//!
//! Everything a renderer needs to draw the prompt lives here. Renderers only
//! ever see a `Snapshot`; mutation goes through `InteractionMachine`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::escalation::accept_scale;
use super::particles::ParticleItem;
use crate::assets::AssetRef;

/// Where the prompt is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Question is open; declines are being dodged
    #[default]
    Pending,
    /// User said yes. Terminal until reset
    Accepted,
}

/// Mutable interaction state owned by the machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    pub phase: Phase,
    pub decline_count: u32,
    /// Absolute top-left of the decline control inside the interaction area.
    /// `None` keeps it at its in-flow default position.
    pub control_position: Option<Vec2>,
    /// Accept-control scale, in `[1, ACCEPT_SCALE_MAX]`
    pub accept_scale: f32,
    /// Celebration asset fixed for the current acceptance
    pub selected_asset: Option<AssetRef>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: Phase::Pending,
            decline_count: 0,
            control_position: None,
            accept_scale: accept_scale(0),
            selected_asset: None,
        }
    }
}

impl InteractionState {
    pub fn is_accepted(&self) -> bool {
        self.phase == Phase::Accepted
    }

    /// Accepted prompts have no decline control in play
    pub fn invariants_hold(&self) -> bool {
        let position_ok = !self.is_accepted() || self.control_position.is_none();
        let scale_ok = (1.0..=crate::consts::ACCEPT_SCALE_MAX).contains(&self.accept_scale);
        position_ok && scale_ok
    }
}

/// RNG seed wrapper so a session can be replayed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Everything the renderer draws, resolved and owned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Bumped on every applied transition
    pub revision: u64,
    pub phase: Phase,
    pub decline_count: u32,
    pub control_position: Option<Vec2>,
    pub accept_scale: f32,
    /// Image currently on display
    pub asset: AssetRef,
    /// Status urgency, 0-3
    pub status_band: usize,
    pub status_line: String,
    pub headline: String,
    /// Only shown once accepted
    pub subline: Option<String>,
    /// Only shown once accepted
    pub reset_label: Option<String>,
    /// Decline control wears its stop badge
    pub stop_badge: bool,
    pub particles: Vec<ParticleItem>,
    /// When the host should schedule the next sweep
    pub next_sweep_at: Option<f64>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = InteractionState::default();
        assert_eq!(state.phase, Phase::Pending);
        assert_eq!(state.decline_count, 0);
        assert_eq!(state.accept_scale, 1.0);
        assert!(state.control_position.is_none());
        assert!(state.selected_asset.is_none());
        assert!(state.invariants_hold());
    }

    #[test]
    fn test_accepted_with_position_breaks_invariant() {
        let state = InteractionState {
            phase: Phase::Accepted,
            control_position: Some(Vec2::new(1.0, 2.0)),
            ..Default::default()
        };
        assert!(!state.invariants_hold());
    }

    #[test]
    fn test_rng_state_replays() {
        use rand::Rng;
        let a: u32 = RngState::new(9).to_rng().random();
        let b: u32 = RngState::new(9).to_rng().random();
        assert_eq!(a, b);
    }
}
