use chrono::NaiveDate;

/// Source of "today" for streak computation.
///
/// The streak engine never reads the wall clock directly so that a fixed
/// calendar day can be injected in tests and the caller decides which
/// timezone defines a day boundary.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single calendar day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
