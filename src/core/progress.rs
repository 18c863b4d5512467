/// Coarse completion meter: one mark per 10% band of the run.
///
/// The threshold compares against the truncated integer percentage of the
/// previous mark, so a mark can land one iteration late, and totals just
/// above ten (where one iteration spans most of a band) emit fewer than
/// nine marks. Cosmetic imprecision, kept on purpose to match the
/// long-standing output.
#[derive(Debug, Clone, Copy)]
pub struct ProgressMeter {
    total: u64,
    last_tick: u32,
}

impl ProgressMeter {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            last_tick: 0,
        }
    }

    /// Advance to `completed` finished iterations; `true` means a mark
    /// should be emitted.
    pub fn advance(&mut self, completed: u64) -> bool {
        if self.total == 0 {
            return false;
        }

        let pct = (completed as f64 / self.total as f64) * 100.0;

        if pct >= f64::from(self.last_tick) + 10.0 {
            self.last_tick = pct as u32;
            true
        } else {
            false
        }
    }
}
