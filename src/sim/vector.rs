//! Vector operations used by the actor simulation
//!
//! `glam::Vec2` carries the value; this trait adds the in-place mutators and
//! angle queries the integrator and actors are written against.

use glam::Vec2;

/// In-place and query helpers on top of `Vec2`
pub trait VectorExt {
    /// Negate both components in place
    fn invert(&mut self) -> &mut Self;
    /// Multiply in place
    fn scale_by(&mut self, factor: f32) -> &mut Self;
    /// Scaled copy, leaving `self` untouched
    fn nscale(&self, factor: f32) -> Vec2;
    /// Rotate in place by `radians` (counter-clockwise in y-up terms)
    fn rotate_by(&mut self, radians: f32) -> &mut Self;
    /// Signed angle from this vector's direction to `other`'s direction
    fn theta_to(&self, other: Vec2) -> f32;
}

impl VectorExt for Vec2 {
    #[inline]
    fn invert(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    #[inline]
    fn scale_by(&mut self, factor: f32) -> &mut Self {
        *self *= factor;
        self
    }

    #[inline]
    fn nscale(&self, factor: f32) -> Vec2 {
        *self * factor
    }

    #[inline]
    fn rotate_by(&mut self, radians: f32) -> &mut Self {
        let (sa, ca) = radians.sin_cos();
        let rx = self.x * ca - self.y * sa;
        let ry = self.x * sa + self.y * ca;
        self.x = rx;
        self.y = ry;
        self
    }

    #[inline]
    fn theta_to(&self, other: Vec2) -> f32 {
        other.y.atan2(other.x) - self.y.atan2(self.x)
    }
}

/// Unit vector for an angle in radians
#[inline]
pub fn from_angle(radians: f32) -> Vec2 {
    let (s, c) = radians.sin_cos();
    Vec2::new(c, s)
}
