//! Escalation: how hard the prompt pushes back as declines pile up

use serde::{Deserialize, Serialize};

use crate::consts::{ACCEPT_SCALE_MAX, ACCEPT_SCALE_STEP, STOP_BADGE_AFTER};

/// Urgency of the status line, derived from decline count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusBand {
    /// No declines yet
    Invite,
    /// 1-2 declines
    Pleading,
    /// 3-6 declines
    Insistent,
    /// 7+ declines
    Urgent,
}

impl StatusBand {
    /// Band for a given decline count
    pub fn for_count(count: u32) -> Self {
        match count {
            0 => StatusBand::Invite,
            1..=2 => StatusBand::Pleading,
            3..=6 => StatusBand::Insistent,
            _ => StatusBand::Urgent,
        }
    }

    /// Band index (0-3)
    pub fn index(&self) -> usize {
        match self {
            StatusBand::Invite => 0,
            StatusBand::Pleading => 1,
            StatusBand::Insistent => 2,
            StatusBand::Urgent => 3,
        }
    }
}

/// Accept-control scale for a decline count, capped at `ACCEPT_SCALE_MAX`
#[inline]
pub fn accept_scale(count: u32) -> f32 {
    (1.0 + ACCEPT_SCALE_STEP * count as f32).min(ACCEPT_SCALE_MAX)
}

/// Register one decline: returns the new count and the matching accept scale
pub fn on_decline(count: u32) -> (u32, f32) {
    let next = count.saturating_add(1);
    (next, accept_scale(next))
}

/// Band index of the status message for `count`
pub fn status_band(count: u32) -> usize {
    StatusBand::for_count(count).index()
}

/// Whether the decline control wears its stop badge
pub fn shows_stop_badge(count: u32) -> bool {
    count > STOP_BADGE_AFTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(status_band(0), 0);
        assert_eq!(status_band(1), 1);
        assert_eq!(status_band(2), 1);
        assert_eq!(status_band(3), 2);
        assert_eq!(status_band(6), 2);
        assert_eq!(status_band(7), 3);
        assert_eq!(status_band(u32::MAX), 3);
    }

    #[test]
    fn test_on_decline_growth() {
        assert_eq!(on_decline(0), (1, 1.5));
        assert_eq!(on_decline(2), (3, 2.5));
        // 1 + 0.5 * 14 = 8
        assert_eq!(on_decline(13), (14, 8.0));
        assert_eq!(on_decline(100), (101, 8.0));
    }

    #[test]
    fn test_scale_starts_at_one() {
        assert_eq!(accept_scale(0), 1.0);
    }

    #[test]
    fn test_stop_badge() {
        assert!(!shows_stop_badge(5));
        assert!(shows_stop_badge(6));
    }

    proptest! {
        #[test]
        fn scale_matches_formula_and_is_capped(count in 0u32..10_000) {
            let expected = (1.0 + 0.5 * count as f32).min(8.0);
            prop_assert_eq!(accept_scale(count), expected);
            prop_assert!((1.0..=8.0).contains(&accept_scale(count)));
        }

        #[test]
        fn scale_is_non_decreasing(count in 0u32..10_000) {
            prop_assert!(accept_scale(count + 1) >= accept_scale(count));
        }

        #[test]
        fn band_is_non_decreasing(count in 0u32..10_000) {
            prop_assert!(status_band(count + 1) >= status_band(count));
        }
    }
}
