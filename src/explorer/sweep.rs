use serde::Serialize;

use crate::error::DseError;

/// # Description
/// an inclusive arithmetic progression of top level bandwidths
/// - `tick > 0` and `min <= max` always hold, see [`SweepSpec::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepSpec {
    min: u64,
    max: u64,
    tick: u64,
}

impl SweepSpec {
    pub fn new(min: u64, max: u64, tick: u64) -> Result<Self, DseError> {
        if tick == 0 || min > max {
            return Err(DseError::InvalidSweep { min, max, tick });
        }
        Ok(SweepSpec { min, max, tick })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// number of points, `(max - min) / tick + 1`
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.tick) as usize + 1
    }

    /// never true, a sweep holds at least `min`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// # Description
    /// - the points `min, min + tick, ...` while they are `<= max`
    /// - the last point is not rounded up to `max`
    /// - every call starts again from `min`
    /// # Example
    /// ```
    /// use noc_dse::explorer::SweepSpec;
    /// let spec = SweepSpec::new(0, 12, 5).unwrap();
    /// assert_eq!(spec.enumerate().collect::<Vec<_>>(), vec![0, 5, 10]);
    /// ```
    pub fn enumerate(&self) -> SweepIter {
        SweepIter {
            next: Some(self.min),
            max: self.max,
            tick: self.tick,
        }
    }
}

impl IntoIterator for &SweepSpec {
    type Item = u64;
    type IntoIter = SweepIter;

    fn into_iter(self) -> SweepIter {
        self.enumerate()
    }
}

#[derive(Debug, Clone)]
pub struct SweepIter {
    next: Option<u64>,
    max: u64,
    tick: u64,
}

impl Iterator for SweepIter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.next.filter(|bw| *bw <= self.max)?;
        // stop instead of wrapping when max is close to u64::MAX
        self.next = current.checked_add(self.tick);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(bw) if bw <= self.max => ((self.max - bw) / self.tick) as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter {}
