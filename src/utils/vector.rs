use std::ops::{Add, Mul};

/// Lightweight 2D vector for surface-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset of `length` along the direction `angle` (radians).
    pub fn from_polar(angle: f32, length: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: cos * length,
            y: sin * length,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl From<eframe::egui::Vec2> for Vec2 {
    fn from(v: eframe::egui::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}
