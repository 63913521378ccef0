use glam::Vec2;
use rand::Rng;

use crate::{config::FieldParams, pointer::PointerState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
}

impl Particle {
    #[cfg(test)]
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// A star somewhere on the surface, drifting down at its base speed
    pub fn spawn(rng: &mut impl Rng, surface: Vec2, max_radius: f32, max_speed: f32) -> Self {
        let speed = rng.gen::<f32>() * max_speed;

        Self {
            position: Vec2::new(rng.gen::<f32>() * surface.x, rng.gen::<f32>() * surface.y),
            velocity: Vec2::new(0.0, speed),
            radius: rng.gen::<f32>() * max_radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn step(&mut self, pointer: &PointerState, params: &FieldParams, surface: Vec2) {
        if self.position.distance(pointer.position) < params.influence_radius {
            self.velocity += pointer.wind * params.wind_factor;
        }

        self.velocity.y += params.gravity;
        self.velocity *= params.friction;

        self.position += self.velocity;
        self.position = Vec2::new(
            wrap_axis(self.position.x, surface.x),
            wrap_axis(self.position.y, surface.y),
        );
    }
}

/// Single-step toroidal wrap into `[0, extent)`
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value >= extent {
        0.0
    } else if value < 0.0 {
        just_below(extent)
    } else {
        value
    }
}

// Scaling by (1 - EPSILON) always lands at least one ulp below a positive extent.
fn just_below(extent: f32) -> f32 {
    (extent * (1.0 - f32::EPSILON)).max(0.0)
}
