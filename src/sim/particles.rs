//! Transient feedback particles
//!
//! Hearts on accept, protest glyphs on decline. Particles are immutable once
//! spawned and are dropped by `sweep` once they are `PARTICLE_EXPIRY_MS` old.
//! The float/fade animation itself belongs to the renderer; we only own the
//! randomized parameters and the lifetime.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lerp_range;

/// Glyph used if the protest pool is empty
pub const FALLBACK_PROTEST_GLYPH: &str = "\u{1F622}";

/// Particle identity: creation time plus a per-lifecycle sequence number.
///
/// `seq` is strictly increasing, so a whole burst spawned in the same
/// millisecond still gets distinct, ordered ids. Age is measured from `born_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleId {
    pub born_ms: f64,
    pub seq: u64,
}

/// What spawned the particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Celebration,
    Protest,
}

/// Animation parameters handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Horizontal position, percent of viewport width
    pub x_pct: f32,
    pub duration_secs: f32,
    pub delay_secs: f32,
    pub scale: f32,
}

/// A single feedback particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleItem {
    pub id: ParticleId,
    pub kind: ParticleKind,
    /// Glyph or short text
    pub payload: String,
    pub spawn: SpawnParams,
}

impl ParticleItem {
    /// Age in milliseconds at `now_ms`
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.id.born_ms
    }

    #[inline]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.age_ms(now_ms) >= PARTICLE_EXPIRY_MS
    }
}

/// Single pending cleanup deadline.
///
/// Armed while particles exist, disarmed once the collection is empty so an
/// idle prompt schedules no background work.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepSchedule {
    deadline: Option<f64>,
}

impl SweepSchedule {
    pub fn arm(&mut self, at_ms: f64) {
        self.deadline = Some(at_ms);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True when armed and the deadline has passed
    pub fn is_due(&self, now_ms: f64) -> bool {
        self.deadline.is_some_and(|at| now_ms >= at)
    }
}

/// Owns every live particle and its cleanup schedule
#[derive(Debug, Clone, Default)]
pub struct ParticleLifecycle {
    /// Ordered by `id.seq`
    items: Vec<ParticleItem>,
    next_seq: u64,
    schedule: SweepSchedule,
}

impl ParticleLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view for rendering
    pub fn items(&self) -> &[ParticleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the host should next call `sweep`, if at all
    pub fn next_sweep_at(&self) -> Option<f64> {
        self.schedule.deadline()
    }

    pub fn schedule(&self) -> &SweepSchedule {
        &self.schedule
    }

    fn next_id(&mut self, now_ms: f64) -> ParticleId {
        let seq = self.next_seq;
        self.next_seq += 1;
        ParticleId { born_ms: now_ms, seq }
    }

    /// Spawn `n` rising hearts with independently randomized parameters.
    ///
    /// `n` is capped at `MAX_CELEBRATION_BURST`. Returns the newly created items.
    pub fn spawn_celebration<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        n: usize,
        glyph: &str,
    ) -> &[ParticleItem] {
        self.sweep(now_ms);
        let n = n.min(MAX_CELEBRATION_BURST);
        let start = self.items.len();
        self.items.reserve(n);
        for _ in 0..n {
            let id = self.next_id(now_ms);
            let spawn = SpawnParams {
                x_pct: lerp_range(CELEBRATION_X_PCT, rng.random()),
                duration_secs: lerp_range(CELEBRATION_DURATION_SECS, rng.random()),
                delay_secs: lerp_range(CELEBRATION_DELAY_SECS, rng.random()),
                scale: lerp_range(CELEBRATION_SCALE, rng.random()),
            };
            self.items.push(ParticleItem {
                id,
                kind: ParticleKind::Celebration,
                payload: glyph.to_string(),
                spawn,
            });
        }
        self.rearm();
        log::debug!("Spawned {} celebration particles ({} live)", n, self.items.len());
        &self.items[start..]
    }

    /// Spawn one protest glyph drawn uniformly from `glyphs`
    pub fn spawn_protest<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        glyphs: &[String],
    ) -> &ParticleItem {
        self.sweep(now_ms);
        let payload = if glyphs.is_empty() {
            FALLBACK_PROTEST_GLYPH.to_string()
        } else {
            glyphs[rng.random_range(0..glyphs.len())].clone()
        };
        let id = self.next_id(now_ms);
        let spawn = SpawnParams {
            x_pct: lerp_range(PROTEST_X_PCT, rng.random()),
            duration_secs: lerp_range(PROTEST_DURATION_SECS, rng.random()),
            delay_secs: 0.0,
            scale: 1.0,
        };
        self.items.push(ParticleItem {
            id,
            kind: ParticleKind::Protest,
            payload,
            spawn,
        });
        self.rearm();
        &self.items[self.items.len() - 1]
    }

    /// Remove every particle aged `PARTICLE_EXPIRY_MS` or more.
    ///
    /// Idempotent. Returns how many were removed.
    pub fn sweep(&mut self, now_ms: f64) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.is_expired(now_ms));
        let removed = before - self.items.len();
        if removed > 0 {
            log::debug!("Swept {} particles ({} live)", removed, self.items.len());
        }
        self.rearm();
        removed
    }

    /// Point the schedule at the oldest particle's expiry, or disarm when empty
    fn rearm(&mut self) {
        let oldest = self
            .items
            .iter()
            .map(|p| p.id.born_ms)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        match oldest {
            Some(born) => self.schedule.arm(born + PARTICLE_EXPIRY_MS),
            None => self.schedule.disarm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn glyphs() -> Vec<String> {
        ["Nooo", "Rude!", "\u{1F494}"].iter().map(|s| s.to_string()).collect()
    }

    fn in_range(v: f32, range: (f32, f32)) -> bool {
        v >= range.0 && v <= range.1
    }

    #[test]
    fn test_celebration_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = ParticleLifecycle::new();
        let burst = particles.spawn_celebration(&mut rng, 1000.0, CELEBRATION_BURST, "\u{2764}");
        assert_eq!(burst.len(), 70);
        for p in burst {
            assert_eq!(p.kind, ParticleKind::Celebration);
            assert!(in_range(p.spawn.x_pct, CELEBRATION_X_PCT));
            assert!(in_range(p.spawn.duration_secs, CELEBRATION_DURATION_SECS));
            assert!(in_range(p.spawn.delay_secs, CELEBRATION_DELAY_SECS));
            assert!(in_range(p.spawn.scale, CELEBRATION_SCALE));
        }
    }

    #[test]
    fn test_celebration_burst_is_capped() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = ParticleLifecycle::new();
        let burst = particles.spawn_celebration(&mut rng, 0.0, usize::MAX, "\u{2764}");
        assert_eq!(burst.len(), MAX_CELEBRATION_BURST);
    }

    #[test]
    fn test_same_tick_burst_ids_are_unique_and_increasing() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = ParticleLifecycle::new();
        particles.spawn_celebration(&mut rng, 1000.0, 70, "\u{2764}");
        particles.spawn_protest(&mut rng, 1000.0, &glyphs());
        let seqs: Vec<u64> = particles.items().iter().map(|p| p.id.seq).collect();
        assert_eq!(seqs.len(), 71);
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_protest_params() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = ParticleLifecycle::new();
        let pool = glyphs();
        for i in 0..50 {
            let p = particles.spawn_protest(&mut rng, i as f64, &pool).clone();
            assert_eq!(p.kind, ParticleKind::Protest);
            assert!(pool.contains(&p.payload));
            assert!(in_range(p.spawn.x_pct, PROTEST_X_PCT));
            assert!(in_range(p.spawn.duration_secs, PROTEST_DURATION_SECS));
            assert_eq!(p.spawn.delay_secs, 0.0);
        }
    }

    #[test]
    fn test_protest_empty_pool_uses_fallback() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = ParticleLifecycle::new();
        let p = particles.spawn_protest(&mut rng, 0.0, &[]);
        assert_eq!(p.payload, FALLBACK_PROTEST_GLYPH);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = ParticleLifecycle::new();
        particles.spawn_protest(&mut rng, 500.0, &glyphs());

        assert_eq!(particles.sweep(6499.0), 0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles.sweep(6500.0), 1);
        assert!(particles.is_empty());
        // Idempotent
        assert_eq!(particles.sweep(6500.0), 0);
        assert_eq!(particles.sweep(99_999.0), 0);
    }

    #[test]
    fn test_schedule_arms_and_disarms() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = ParticleLifecycle::new();
        assert_eq!(particles.next_sweep_at(), None);

        particles.spawn_protest(&mut rng, 1000.0, &glyphs());
        particles.spawn_protest(&mut rng, 4000.0, &glyphs());
        assert_eq!(particles.next_sweep_at(), Some(7000.0));
        assert!(!particles.schedule().is_due(6999.0));
        assert!(particles.schedule().is_due(7000.0));

        particles.sweep(7000.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles.next_sweep_at(), Some(10_000.0));

        particles.sweep(10_000.0);
        assert_eq!(particles.next_sweep_at(), None);
        assert!(!particles.schedule().is_armed());
    }

    #[test]
    fn test_spawn_sweeps_lazily() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = ParticleLifecycle::new();
        particles.spawn_protest(&mut rng, 0.0, &glyphs());
        particles.spawn_protest(&mut rng, 6000.0, &glyphs());
        assert_eq!(particles.len(), 1);
        assert_eq!(particles.items()[0].id.born_ms, 6000.0);
    }

    proptest! {
        #[test]
        fn particle_lives_exactly_the_expiry_window(
            born in 0.0f64..1.0e9,
            before in 0.0f64..5999.0,
            after in 6000.5f64..1.0e6,
        ) {
            let mut rng = Pcg32::seed_from_u64(born as u64);
            let mut particles = ParticleLifecycle::new();
            particles.spawn_protest(&mut rng, born, &glyphs());

            particles.sweep(born + before);
            prop_assert_eq!(particles.len(), 1);
            particles.sweep(born + after);
            prop_assert!(particles.is_empty());
        }
    }
}
