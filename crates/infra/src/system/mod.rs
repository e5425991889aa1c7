use chrono::{Local, NaiveDate};

// Mocking out the clock so that it is possible to run tests that depend on "today".
pub trait ISys: Send + Sync {
    /// The current local calendar date
    fn today(&self) -> NaiveDate;
}

/// System that reads the real local clock and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn today(&self) -> NaiveDate {
        Local::now().naive_local().date()
    }
}

/// System stuck on a single day
pub struct FixedSys {
    pub today: NaiveDate,
}
impl ISys for FixedSys {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
