//! Types for use as [crate::Read::Cfg].

use core::ops::{Bound, RangeBounds};

/// Configuration for limiting the length of a variable-size value.
///
/// Length prefixes read from untrusted input are checked against a `RangeCfg`
/// before any bytes are copied, so a hostile prefix cannot force a large allocation.
///
/// # Examples
///
/// ```
/// use ledger_codec::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(500));
/// assert!(!cfg.contains(2000));
///
/// let non_empty = RangeCfg::from(1..);
/// assert!(!non_empty.contains(0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl RangeCfg {
    /// Creates a new `RangeCfg` from any range of lengths.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `len`.
    pub fn exact(len: usize) -> Self {
        Self::new(len..=len)
    }

    /// Returns true if `len` is within this range.
    pub fn contains(&self, len: usize) -> bool {
        (self.start, self.end).contains(&len)
    }
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::new(..)
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for RangeCfg {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}
impl_from_range!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeTo<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull
);
