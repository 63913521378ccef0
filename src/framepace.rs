use std::time::{Duration, Instant};

/// Measures refresh intervals and optionally holds frames to a fixed rate
pub struct Framepacer {
    frame_start: Instant,
    last_frametime: Duration,
    limit: Option<Duration>,
}

impl Framepacer {
    pub fn new(framerate: Option<u32>) -> Self {
        Self {
            frame_start: Instant::now(),
            last_frametime: Duration::ZERO,
            limit: framerate
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_secs_f64(1.0 / fps as f64)),
        }
    }

    #[cfg(test)]
    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    /// Duration of the last completed frame
    pub fn frametime(&self) -> Duration {
        self.last_frametime
    }

    pub fn framerate(&self) -> f32 {
        let seconds = self.last_frametime.as_secs_f32();
        if seconds > 0.0 {
            1.0 / seconds
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn end_frame(&mut self) {
        if let Some(limit) = self.limit {
            const ACCURACY: Duration = Duration::from_micros(100);
            let elapsed = self.frame_start.elapsed();

            if let Some(sleep_time) = limit.checked_sub(elapsed + ACCURACY) {
                std::thread::sleep(sleep_time);
            }
            while self.frame_start.elapsed() < limit {
                std::thread::yield_now();
            }
        }

        self.last_frametime = self.frame_start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_framerate_means_uncapped() {
        assert_eq!(Framepacer::new(Some(0)).limit(), None);
        assert_eq!(Framepacer::new(None).limit(), None);
    }

    #[test]
    fn capped_frame_lasts_at_least_the_limit() {
        let mut pacer = Framepacer::new(Some(200));
        pacer.begin_frame();
        pacer.end_frame();

        assert!(pacer.frametime() >= Duration::from_millis(5));
        assert!(pacer.framerate() <= 200.5);
    }
}
