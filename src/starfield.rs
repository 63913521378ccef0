//! Frame scheduling around the particle field.
//!
//! Pointer and resize signals arrive at any rate; each is parked in a
//! [`Coalesced`] request and applied once at the next refresh, right before
//! the tick.

use glam::{UVec2, Vec2};
use log::{debug, trace};
use rand::Rng;

use crate::{
    canvas::Canvas,
    coalesce::Coalesced,
    config::{FieldParams, StarfieldConfig},
    field::ParticleField,
    pointer::PointerState,
};

pub struct Starfield {
    field: ParticleField,
    pointer: PointerState,

    pending_pointer: Coalesced<Vec2>,
    pending_resize: Coalesced<UVec2>,
}

impl Starfield {
    pub fn new(config: &StarfieldConfig, size: UVec2, rng: &mut impl Rng) -> Self {
        let surface = size.as_vec2();

        Self {
            field: ParticleField::new(config, surface, rng),
            pointer: PointerState::new(surface),

            pending_pointer: Coalesced::new(),
            pending_resize: Coalesced::new(),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn set_params(&mut self, params: FieldParams) {
        debug!("Field parameters changed: {params:?}");
        self.field.set_params(params);
    }

    pub fn on_pointer_move(&mut self, position: Vec2) {
        if self.pending_pointer.schedule(position) {
            trace!("Superseded pending pointer sample");
        }
    }

    pub fn on_resize(&mut self, size: UVec2) {
        if self.pending_resize.schedule(size) {
            trace!("Superseded pending resize");
        }
    }

    /// Applies the requests parked since the last refresh, returning the new
    /// surface size when a resize went through
    pub fn apply_pending(&mut self) -> Option<UVec2> {
        let resized = self.pending_resize.flush();
        if let Some(size) = resized {
            debug!("Surface resized to {}x{}", size.x, size.y);
            self.field.resize(size.as_vec2());
        }

        if let Some(position) = self.pending_pointer.flush() {
            self.pointer.record(position);
        }

        resized
    }

    pub fn tick(&mut self, canvas: &mut impl Canvas) {
        self.field.update(&self.pointer);
        self.field.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::canvas::{DrawCommand, DrawList};

    fn starfield(count: u32) -> Starfield {
        let config = StarfieldConfig {
            particle_count: count,
            ..Default::default()
        };
        Starfield::new(&config, UVec2::new(640, 480), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn pointer_burst_yields_one_wind_sample() {
        let mut starfield = starfield(0);
        let start = starfield.pointer().position;

        starfield.on_pointer_move(Vec2::new(330.0, 250.0));
        starfield.on_pointer_move(Vec2::new(350.0, 260.0));
        starfield.on_pointer_move(Vec2::new(400.0, 300.0));

        // Nothing moves before the refresh
        assert_eq!(starfield.pointer().position, start);

        starfield.apply_pending();
        assert_eq!(starfield.pointer().position, Vec2::new(400.0, 300.0));
        assert_eq!(starfield.pointer().wind, Vec2::new(400.0, 300.0) - start);

        // A refresh without input leaves the last sample in place
        starfield.apply_pending();
        assert_eq!(starfield.pointer().wind, Vec2::new(400.0, 300.0) - start);
    }

    #[test]
    fn only_the_latest_resize_is_applied() {
        let mut starfield = starfield(3);
        starfield.on_resize(UVec2::new(100, 100));
        starfield.on_resize(UVec2::new(800, 600));

        assert_eq!(starfield.apply_pending(), Some(UVec2::new(800, 600)));
        assert_eq!(starfield.field().surface(), Vec2::new(800.0, 600.0));
        assert_eq!(starfield.apply_pending(), None);
    }

    #[test]
    fn tick_updates_then_draws_each_star() {
        let mut starfield = starfield(10);
        let before: Vec<Vec2> = starfield
            .field()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();

        let mut list = DrawList::new();
        starfield.tick(&mut list);

        assert_eq!(list.commands()[0], DrawCommand::Clear);
        assert_eq!(list.visible_circles().count(), 10);

        let drawn: Vec<Vec2> = list.visible_circles().map(|(center, ..)| center).collect();
        let after: Vec<Vec2> = starfield
            .field()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();
        assert_eq!(drawn, after);
        assert_ne!(before, after);
    }

    #[test]
    fn count_is_constant_across_frames() {
        let mut starfield = starfield(25);
        let mut list = DrawList::new();

        for frame in 0..120u32 {
            starfield.on_pointer_move(Vec2::new((frame * 5 % 640) as f32, 240.0));
            if frame % 30 == 0 {
                starfield.on_resize(UVec2::new(640 - frame, 480 - frame));
            }

            starfield.apply_pending();
            list.reset();
            starfield.tick(&mut list);

            assert_eq!(starfield.field().particles().len(), 25);
            assert_eq!(list.visible_circles().count(), 25);
        }
    }
}
