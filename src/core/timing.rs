use std::time::Instant;

/// Whole milliseconds elapsed since `start`.
///
/// Monotonic, no side effects, safe to call repeatedly without resetting
/// anything.
pub fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Measures the gap between successive frames, in seconds.
///
/// Drives the periodic FPS log of the windowed loop; the benchmark
/// accounting itself runs on whole milliseconds.
#[derive(Debug)]
pub struct FrameClock {
    previous: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            previous: Instant::now(),
        }
    }

    /// Seconds since the previous call (or since `start`), advancing the
    /// clock to now.
    pub fn frame_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = (now - self.previous).as_secs_f32();
        self.previous = now;
        elapsed
    }
}

/// Accumulated milliseconds per measured phase plus the frame counter.
///
/// Accumulators only grow over a run and are read once at the end. The
/// averages use exact integer division; they are undefined at zero frames,
/// hence the `Option`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    pub raster_ms: u64,
    pub present_ms: u64,
    pub frames: u64,
}

impl PhaseTimings {
    pub fn record_raster(&mut self, ms: u64) {
        self.raster_ms += ms;
    }

    pub fn record_present(&mut self, ms: u64) {
        self.present_ms += ms;
    }

    pub fn end_frame(&mut self) {
        self.frames += 1;
    }

    pub fn average_raster_ms(&self) -> Option<u64> {
        (self.frames > 0).then(|| self.raster_ms / self.frames)
    }

    pub fn average_present_ms(&self) -> Option<u64> {
        (self.frames > 0).then(|| self.present_ms / self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn frame_clock_reports_the_gap_since_the_previous_frame() {
        let mut clock = FrameClock::start();
        thread::sleep(Duration::from_millis(10));

        let gap = clock.frame_seconds();
        assert!(gap >= 0.009, "gap {} too short", gap);
        assert!(gap < 0.5, "gap {} too long", gap);
    }

    #[test]
    fn frame_clock_advances_on_every_read() {
        let mut clock = FrameClock::start();
        thread::sleep(Duration::from_millis(10));
        clock.frame_seconds();

        // The sleep above is consumed; a back-to-back read is near zero.
        assert!(clock.frame_seconds() < 0.005);
    }

    #[test]
    fn elapsed_ms_is_monotonic() {
        let start = Instant::now();
        let a = elapsed_ms(start);
        thread::sleep(Duration::from_millis(5));
        let b = elapsed_ms(start);
        assert!(b >= a);
        assert!(b >= 5);
    }

    #[test]
    fn averages_at_one_frame_are_exact() {
        let mut timings = PhaseTimings::default();
        timings.record_raster(17);
        timings.record_present(3);
        timings.end_frame();

        assert_eq!(timings.average_raster_ms(), Some(17));
        assert_eq!(timings.average_present_ms(), Some(3));
    }

    #[test]
    fn averages_truncate_toward_zero() {
        let mut timings = PhaseTimings::default();
        timings.record_raster(7);
        timings.end_frame();
        timings.record_raster(0);
        timings.end_frame();

        // 7 / 2 truncates to 3
        assert_eq!(timings.average_raster_ms(), Some(3));
    }

    #[test]
    fn averages_over_many_frames() {
        let mut timings = PhaseTimings::default();
        for _ in 0..100_000 {
            timings.record_raster(2);
            timings.record_present(4);
            timings.end_frame();
        }

        assert_eq!(timings.frames, 100_000);
        assert_eq!(timings.average_raster_ms(), Some(2));
        assert_eq!(timings.average_present_ms(), Some(4));
    }

    #[test]
    fn zero_frames_has_no_average() {
        let timings = PhaseTimings::default();
        assert_eq!(timings.average_raster_ms(), None);
        assert_eq!(timings.average_present_ms(), None);
    }
}
