use chrono::{Days, Local, NaiveDate};

/// Source of the current calendar date used to resolve "today"/"tomorrow".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn tomorrow(&self) -> NaiveDate {
        next_day(self.today())
    }
}

/// The calendar day after `date`; saturates at the last representable date.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

impl<T: Clock + ?Sized> Clock for &T {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
