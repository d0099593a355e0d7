use chrono::{Local, NaiveDate};

/// Source of "today" for the date display.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedClock(pub std::rc::Rc<std::cell::Cell<NaiveDate>>);

#[cfg(test)]
impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(std::rc::Rc::new(std::cell::Cell::new(date)))
    }

    pub fn set(&self, date: NaiveDate) {
        self.0.set(date);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0.get()
    }
}
