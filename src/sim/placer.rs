//! Decline-control placement
//!
//! Picks a fresh top-left corner for the decline control somewhere inside the
//! interaction area. Axes are drawn independently and the previous spot is not
//! avoided, so the control may land near where it just was.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Host-supplied measurements taken at decline time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Interaction area the control must stay inside
    pub area: Size,
    /// The decline control itself
    pub control: Size,
}

impl Measurement {
    pub const fn new(area: Size, control: Size) -> Self {
        Self { area, control }
    }
}

/// Free travel along one axis once the control and both paddings are removed
#[inline]
fn axis_span(container: f32, control: f32, padding: f32) -> f32 {
    (container - control - 2.0 * padding).max(0.0)
}

/// Compute a random in-bounds position for the decline control.
///
/// Each axis is drawn from `[padding, container - control - padding]`. When
/// the control doesn't fit, that axis collapses to `padding`.
pub fn place<R: Rng + ?Sized>(rng: &mut R, area: Size, control: Size, padding: f32) -> Vec2 {
    let padding = padding.max(0.0);
    let span_x = axis_span(area.width, control.width, padding);
    let span_y = axis_span(area.height, control.height, padding);

    let x = padding + rng.random::<f32>() * span_x;
    let y = padding + rng.random::<f32>() * span_y;
    Vec2::new(x, y)
}

/// Place from an optional measurement; `None` means the area isn't mounted yet.
pub fn place_measured<R: Rng + ?Sized>(
    rng: &mut R,
    measurement: Option<Measurement>,
    padding: f32,
) -> Option<Vec2> {
    let m = measurement?;
    Some(place(rng, m.area, m.control, padding))
}
