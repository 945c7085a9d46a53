//! Inclusive year intervals.

use std::fmt;

/// Calendar year as used in copyright notices.
pub type Year = i32;

/// An inclusive range of years, `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearSpan {
    start: Year,
    end: Year,
}

impl YearSpan {
    /// Create a span covering `start..=end`. A reversed pair is swapped.
    pub fn new(start: Year, end: Year) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn single(year: Year) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(self, other: YearSpan) -> YearSpan {
        YearSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn extend(self, year: Year) -> YearSpan {
        self.union(YearSpan::single(year))
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
