//! Logical world and the camera that views it

use glam::Vec2;

use crate::consts::*;

/// Square logical arena plus the viewport currently shown on screen
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Side length of the arena in logical units
    pub size: f32,
    /// Top-left of the visible window (logical units)
    pub viewx: f32,
    pub viewy: f32,
    /// Side length of the visible window
    pub viewsize: f32,
    /// Screen pixels per logical unit
    pub scale: f32,
    /// Physical render size (pixels)
    pub render_width: f32,
    pub render_height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WORLD_SIZE, VIEW_SIZE, RENDER_WIDTH, RENDER_HEIGHT)
    }
}

impl World {
    pub fn new(size: f32, viewsize: f32, render_width: f32, render_height: f32) -> Self {
        let mut world = Self {
            size,
            viewx: 0.0,
            viewy: 0.0,
            viewsize,
            scale: 1.0,
            render_width,
            render_height,
        };
        world.resize(render_width, render_height);
        world.center_view();
        world
    }

    /// Recompute the scale after the physical render size changed
    pub fn resize(&mut self, render_width: f32, render_height: f32) {
        self.render_width = render_width;
        self.render_height = render_height;
        self.scale = render_width / self.viewsize;
    }

    /// Place the view in the middle of the arena
    pub fn center_view(&mut self) {
        let v = self.size / 2.0 - self.viewsize / 2.0;
        self.viewx = v;
        self.viewy = v;
    }

    /// Center of the arena
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Dead-zone follow: re-center on an axis only while the tracked point is
    /// away from that axis's arena edges
    pub fn follow(&mut self, target: Vec2) {
        let edge = self.viewsize * VIEW_EDGE;
        if target.x > edge && target.x < self.size - edge {
            self.viewx = target.x - self.viewsize * 0.5;
        }
        if target.y > edge && target.y < self.size - edge {
            self.viewy = target.y - self.viewsize * 0.5;
        }
    }

    /// Project a world point to screen space, `None` when the radius-padded
    /// box lies entirely off screen
    pub fn world_to_screen(&self, point: Vec2, radius: f32) -> Option<Vec2> {
        let view = (point - Vec2::new(self.viewx, self.viewy)) * self.scale;
        let rad = radius * self.scale;
        if view.x < -rad
            || view.y < -rad
            || view.x > self.render_width + rad
            || view.y > self.render_height + rad
        {
            return None;
        }
        Some(view)
    }

    /// World position under the center of the screen
    pub fn screen_center(&self) -> Vec2 {
        let m = Vec2::new(self.render_width * 0.5, self.render_height * 0.5) / self.scale;
        m + Vec2::new(self.viewx, self.viewy)
    }

    /// Shrink the view (zoom in). Returns false at the limit.
    pub fn zoom_in(&mut self) -> bool {
        if self.viewsize > VIEW_SIZE_MIN {
            self.viewsize -= VIEW_SIZE_STEP;
            self.resize(self.render_width, self.render_height);
            true
        } else {
            false
        }
    }

    /// Grow the view (zoom out). Returns false at the limit.
    pub fn zoom_out(&mut self) -> bool {
        if self.viewsize < VIEW_SIZE_MAX {
            self.viewsize += VIEW_SIZE_STEP;
            self.resize(self.render_width, self.render_height);
            true
        } else {
            false
        }
    }

    /// True when the point lies outside `[0, size)` on either axis
    pub fn is_outside(&self, p: Vec2) -> bool {
        p.x >= self.size || p.x < 0.0 || p.y >= self.size || p.y < 0.0
    }
}
