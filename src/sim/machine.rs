//! Interaction state machine
//!
//! Owns the prompt state and the particle lifecycle. The three input handlers
//! (accept, decline, reset) plus the sweep tick are the only ways to mutate
//! anything. Every handler runs to completion before returning, so observers
//! never see a half-applied transition.

use rand::Rng;
use rand_pcg::Pcg32;

use super::escalation;
use super::particles::ParticleLifecycle;
use super::placer::{self, Measurement, Size};
use super::state::{InteractionState, Phase, RngState, Snapshot};
use crate::assets::AssetRef;
use crate::settings::Settings;

/// Input events, processed strictly in the order they are dispatched.
///
/// The renderer maps whatever it has (click, pointer-enter, touch, keys) onto
/// these; the origin doesn't matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Accept,
    /// `measurement` is `None` while the interaction area isn't mounted
    Decline { measurement: Option<Measurement> },
    Reset,
    /// Scheduled particle cleanup
    Sweep,
}

/// Called with a fresh snapshot after every applied transition
pub type Observer = Box<dyn FnMut(&Snapshot)>;

/// The prompt controller.
///
/// Owns interaction state, the particle lifecycle, settings, and the random
/// source. Renderers subscribe for snapshots; input reaches it through
/// `dispatch` or the `on_*` handlers.
pub struct InteractionMachine<R = Pcg32> {
    state: InteractionState,
    particles: ParticleLifecycle,
    settings: Settings,
    rng: R,
    revision: u64,
    observers: Vec<Observer>,
}

impl InteractionMachine<Pcg32> {
    /// Create a machine with a seeded RNG
    pub fn new(seed: u64, settings: Settings) -> Self {
        log::info!("Prompt session seed: {}", seed);
        Self::with_rng(RngState::new(seed).to_rng(), settings)
    }
}

impl<R: Rng> InteractionMachine<R> {
    /// Create a machine drawing from the given random source
    pub fn with_rng(rng: R, mut settings: Settings) -> Self {
        settings.sanitize();
        Self {
            state: InteractionState::default(),
            particles: ParticleLifecycle::new(),
            settings,
            rng,
            revision: 0,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn particles(&self) -> &ParticleLifecycle {
        &self.particles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a renderer. It only ever receives read-only snapshots.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Apply one event. Returns whether it changed anything.
    pub fn dispatch(&mut self, event: InputEvent, now_ms: f64) -> bool {
        match event {
            InputEvent::Accept => self.on_accept(now_ms),
            InputEvent::Decline { measurement } => self.on_decline(now_ms, measurement),
            InputEvent::Reset => self.on_reset(),
            InputEvent::Sweep => self.on_sweep(now_ms),
        }
    }

    /// Pending -> Accepted: drop the decline control, fix a celebration asset,
    /// and burst hearts.
    pub fn on_accept(&mut self, now_ms: f64) -> bool {
        if self.state.is_accepted() {
            return false;
        }

        let pool = self.settings.assets.celebration();
        let chosen = pool[self.rng.random_range(0..pool.len())].clone();
        log::info!(
            "Accepted after {} declines, showing {}",
            self.state.decline_count,
            chosen
        );

        self.state.phase = Phase::Accepted;
        self.state.control_position = None;
        self.state.selected_asset = Some(chosen);

        self.particles.spawn_celebration(
            &mut self.rng,
            now_ms,
            self.settings.celebration_burst,
            &self.settings.celebration_glyph,
        );

        self.commit();
        true
    }

    /// Pending -> Pending: count the decline, grow the accept control, move the
    /// decline control, and spawn a protest glyph.
    ///
    /// Placement is skipped when the area isn't measured; the rest still happens.
    /// Every call is a full decline, even back-to-back hover + click.
    pub fn on_decline(&mut self, now_ms: f64, measurement: Option<Measurement>) -> bool {
        if self.state.is_accepted() {
            return false;
        }

        let (count, scale) = escalation::on_decline(self.state.decline_count);
        self.state.decline_count = count;
        self.state.accept_scale = scale;

        match placer::place_measured(&mut self.rng, measurement, self.settings.padding) {
            Some(pos) => self.state.control_position = Some(pos),
            None => log::debug!("Interaction area not measured, decline control stays put"),
        }

        let protest = self
            .particles
            .spawn_protest(&mut self.rng, now_ms, &self.settings.protest_glyphs);
        log::debug!(
            "Decline #{} (scale {:.1}, protest {:?})",
            count,
            scale,
            protest.payload
        );

        self.commit();
        true
    }

    /// Decline using the configured control size for an area the host measured
    pub fn on_decline_in(&mut self, now_ms: f64, area: Size) -> bool {
        let control = self.settings.decline_control;
        self.on_decline(now_ms, Some(Measurement::new(area, control)))
    }

    /// Back to the initial state. Particles are left to expire on their own.
    pub fn on_reset(&mut self) -> bool {
        if self.state.is_accepted() {
            log::info!("Prompt reset");
        }
        self.state = InteractionState::default();
        self.commit();
        true
    }

    /// Drop expired particles. Returns whether any were removed.
    pub fn on_sweep(&mut self, now_ms: f64) -> bool {
        if self.particles.sweep(now_ms) == 0 {
            return false;
        }
        self.commit();
        true
    }

    /// When the host should next dispatch `InputEvent::Sweep`
    pub fn next_sweep_at(&self) -> Option<f64> {
        self.particles.next_sweep_at()
    }

    /// Image to display for the current state
    pub fn displayed_asset(&self) -> &AssetRef {
        let assets = &self.settings.assets;
        match self.state.phase {
            Phase::Accepted => self
                .state
                .selected_asset
                .as_ref()
                .unwrap_or_else(|| assets.celebration_fallback()),
            Phase::Pending if self.state.decline_count == 0 => assets.default_asset(),
            Phase::Pending => assets.protest_for(self.state.decline_count),
        }
    }

    pub fn status_band(&self) -> usize {
        escalation::status_band(self.state.decline_count)
    }

    pub fn snapshot(&self) -> Snapshot {
        let wording = &self.settings.wording;
        let accepted = self.state.is_accepted();
        let band = self.status_band();

        Snapshot {
            revision: self.revision,
            phase: self.state.phase,
            decline_count: self.state.decline_count,
            control_position: self.state.control_position,
            accept_scale: self.state.accept_scale,
            asset: self.displayed_asset().clone(),
            status_band: band,
            status_line: wording.status_line(band).to_string(),
            headline: if accepted {
                wording.accepted_headline.clone()
            } else {
                wording.question.clone()
            },
            subline: accepted.then(|| wording.accepted_subline.clone()),
            reset_label: accepted.then(|| wording.reset_label.clone()),
            stop_badge: !accepted && escalation::shows_stop_badge(self.state.decline_count),
            particles: self.particles.items().to_vec(),
            next_sweep_at: self.particles.next_sweep_at(),
        }
    }

    /// Finish a transition: bump the revision and notify observers
    fn commit(&mut self) {
        debug_assert!(self.state.invariants_hold());
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}
