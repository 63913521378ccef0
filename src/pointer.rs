use glam::Vec2;

/// Last sampled pointer position and the displacement since the sample before
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub wind: Vec2,
}

impl PointerState {
    /// Starts at the centre of the surface with still air
    pub fn new(surface: Vec2) -> Self {
        Self {
            position: surface * 0.5,
            wind: Vec2::ZERO,
        }
    }

    pub fn record(&mut self, position: Vec2) {
        self.wind = position - self.position;
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_is_delta_between_samples() {
        let mut pointer = PointerState::new(Vec2::new(200.0, 100.0));
        assert_eq!(pointer.position, Vec2::new(100.0, 50.0));
        assert_eq!(pointer.wind, Vec2::ZERO);

        pointer.record(Vec2::new(110.0, 40.0));
        assert_eq!(pointer.wind, Vec2::new(10.0, -10.0));

        pointer.record(Vec2::new(110.0, 40.0));
        assert_eq!(pointer.wind, Vec2::ZERO);
    }
}
