use crate::store::RecordStore;
use crate::types::{Year, YearRange};

/// Linear mapping between timeline positions (pixels) and calendar years.
///
/// The domain runs from the start of the first year to the end of the last year, so every
/// year occupies an equal slice of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: YearRange,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: YearRange, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the store's year extent. An empty store gets the single year 0.
    pub fn for_store(store: &RecordStore, range: (f64, f64)) -> Self {
        Self::new(store.year_extent().unwrap_or(YearRange::new(0, 0)), range)
    }

    pub fn domain(&self) -> YearRange {
        self.domain
    }

    /// The year under `position`, clamped to the domain.
    pub fn invert(&self, position: f64) -> Year {
        let (r0, r1) = self.range;
        let width = r1 - r0;
        if !position.is_finite() || width.abs() < f64::EPSILON {
            return self.domain.min();
        }
        let t = ((position - r0) / width).clamp(0.0, 1.0);
        let year = f64::from(self.domain.min()) + t * self.span();
        // Positions produced by `position()` must map back onto the same year.
        let year = (year + 1e-9).floor() as Year;
        year.clamp(self.domain.min(), self.domain.max())
    }

    /// Position of the start of `year`.
    pub fn position(&self, year: Year) -> f64 {
        self.position_at(f64::from(year))
    }

    /// Initial brush: the last `years_back` years before the final year, through its end.
    pub fn default_selection(&self, years_back: u32) -> [f64; 2] {
        let start = self.domain.max().saturating_sub_unsigned(years_back).max(self.domain.min());
        [self.position(start), self.position_at(f64::from(self.domain.max()) + 1.0)]
    }

    // Year arithmetic stays in f64 so extents near the ends of `i32` cannot overflow.
    fn position_at(&self, year: f64) -> f64 {
        let (r0, r1) = self.range;
        let offset = year - f64::from(self.domain.min());
        r0 + offset / self.span() * (r1 - r0)
    }

    fn span(&self) -> f64 {
        self.domain.span() as f64
    }
}
