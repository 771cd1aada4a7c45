/// Generator of stepped numbers series which may wrap around a cycle.
///
/// `22-2` over hours cycle `0-23` produces `22, 23, 0, 1, 2`,
/// and the step is counted along the wrapped sequence, so `22-2/3` produces `22, 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SeriesWithStep {
    start: u32,
    step: u32,
    len: u32,
    cycle: (u32, u32),
    position: u32,
}

impl SeriesWithStep {
    /// Caller is responsible to ensure that `start` and `end` are within the `cycle`
    /// and the `step` isn't zero.
    #[inline]
    pub(crate) fn new(start: u32, end: u32, step: u32, cycle: (u32, u32)) -> Self {
        debug_assert!(step > 0, "step value is 0");
        debug_assert!(cycle.0 <= start && start <= cycle.1, "start value is out of cycle");
        debug_assert!(cycle.0 <= end && end <= cycle.1, "end value is out of cycle");

        let len = if start <= end {
            end - start + 1
        } else {
            (cycle.1 - start + 1) + (end - cycle.0 + 1)
        };

        Self {
            start,
            step: step.max(1),
            len,
            cycle,
            position: 0,
        }
    }
}

impl Iterator for SeriesWithStep {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.len {
            return None;
        }

        let value = self.start + self.position;
        let value = if value > self.cycle.1 {
            self.cycle.0 + (value - self.cycle.1 - 1)
        } else {
            value
        };
        self.position = self.position.saturating_add(self.step);

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.position).div_ceil(self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SeriesWithStep {}
