use glam::Vec2;
use rand::Rng;

use crate::{
    canvas::Canvas,
    config::{FieldParams, StarfieldConfig},
    particle::Particle,
    pointer::PointerState,
};

/// A fixed population of stars sharing one surface
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    color: [f32; 4],
    surface: Vec2,
}

impl ParticleField {
    pub fn new(config: &StarfieldConfig, surface: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(rng, surface, config.max_radius, config.max_speed))
            .collect();

        Self {
            particles,
            params: config.params(),
            color: config.color,
            surface,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> FieldParams {
        self.params
    }

    pub fn set_params(&mut self, params: FieldParams) {
        self.params = params;
    }

    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    /// Particles outside a shrunk surface are left alone and wrap on their next move
    pub fn resize(&mut self, surface: Vec2) {
        self.surface = surface;
    }

    pub fn update(&mut self, pointer: &PointerState) {
        for particle in &mut self.particles {
            particle.step(pointer, &self.params, self.surface);
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.clear();
        for particle in &self.particles {
            canvas.fill_circle(particle.position, particle.radius(), self.color);
        }
    }

    #[cfg(test)]
    pub(crate) fn from_particles(
        particles: Vec<Particle>,
        params: FieldParams,
        surface: Vec2,
    ) -> Self {
        Self {
            particles,
            params,
            color: [1.0; 4],
            surface,
        }
    }
}
