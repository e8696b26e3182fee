//! Sector and radius math for a roulette of diameter `size`.
//!
//! Sector 0 starts at 12 o'clock and sectors run clockwise, in surface
//! coordinates (y grows downwards).

use std::f64::consts::{PI, TAU};

/// Rim radius as a fraction of `size` (15/16 diameter).
pub const OUTER_RADIUS: f64 = 15.0 / 32.0;
/// Highlight rim, slightly past the outer rim so it covers the edge.
pub const SELECTED_RADIUS: f64 = 31.0 / 64.0;
pub const HUB_RADIUS: f64 = 1.0 / 8.0;
pub const BUTTON_RADIUS: f64 = HUB_RADIUS * 7.0 / 8.0;
pub const START_OFFSET: f64 = -PI / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

pub fn angle_step(n: usize) -> f64 {
    TAU / n as f64
}

/// Boundary angle where sector `i` of `n` begins.
pub fn sector_angle(i: usize, n: usize) -> f64 {
    i as f64 * angle_step(n) + START_OFFSET
}

pub fn sector_center_angle(i: usize, n: usize) -> f64 {
    (i as f64 + 0.5) * angle_step(n) + START_OFFSET
}

/// Clockwise angle from 12 o'clock of an offset from the center, in `[0, 2π)`.
pub fn clock_angle(offset: Point) -> f64 {
    (offset.y.atan2(offset.x) + 2.5 * PI) % TAU
}

/// Sector under an offset from the center, clamped to `[0, n - 1]`.
pub fn sector_at(offset: Point, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let raw = (clock_angle(offset) / angle_step(n)).floor();
    (raw.max(0.0) as usize).min(n - 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub size: f64,
}

impl Geometry {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    pub fn outer_radius(&self) -> f64 {
        OUTER_RADIUS * self.size
    }

    pub fn selected_radius(&self) -> f64 {
        SELECTED_RADIUS * self.size
    }

    pub fn hub_radius(&self) -> f64 {
        HUB_RADIUS * self.size
    }

    pub fn button_radius(&self) -> f64 {
        BUTTON_RADIUS * self.size
    }

    pub fn point_on_circle(&self, angle: f64, radius: f64) -> Point {
        let c = self.center();
        Point::new(c.x + radius * angle.cos(), c.y + radius * angle.sin())
    }

    /// Midway between the hub boundary and `outer`, so text sits centered in the ring.
    pub fn label_anchor(&self, angle: f64, outer: f64, inner: f64) -> Point {
        self.point_on_circle(angle, inner + (outer - inner) / 2.0)
    }

    pub fn offset_of(&self, p: Point) -> Point {
        p.offset_from(self.center())
    }

    pub fn in_button(&self, p: Point) -> bool {
        self.offset_of(p).length() <= self.button_radius()
    }
}
