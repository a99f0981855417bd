//! Time window selection.
//!
//! The window is anchored on the first record with a valid timestamp and
//! then applied to every following record.

use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::error::PlotError;

/// How the window is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Keep records with `start < timestamp <= end`, where both bounds are
    /// times of day on the first record's date shifted by `roll` days.
    Bounded {
        start: NaiveTime,
        end: NaiveTime,
        roll: i64,
    },
    /// Keep every record with a valid timestamp.
    All,
}

impl WindowMode {
    /// Compute the window from the first parsed timestamp.
    pub fn establish(&self, first: NaiveDateTime) -> Result<Window, PlotError> {
        match *self {
            WindowMode::Bounded { start, end, roll } => {
                let date = shift_days(first, roll)
                    .ok_or_else(|| PlotError::usage(format!("Day roll {} is out of range", roll)))?;
                Ok(Window {
                    start: date.and_time(start),
                    end: date.and_time(end),
                })
            }
            WindowMode::All => Ok(Window {
                start: first,
                end: first,
            }),
        }
    }
}

fn shift_days(at: NaiveDateTime, roll: i64) -> Option<chrono::NaiveDate> {
    let date = at.date();
    let days = Days::new(roll.unsigned_abs());
    if roll >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// An established time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// What to do with one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Export the record.
    Emit,
    /// Drop the record and keep reading.
    Skip,
    /// Past the end of a bounded window; stop reading.
    Stop,
}

/// Applies a [`WindowMode`] to a stream of timestamps.
#[derive(Debug, Clone)]
pub struct Windower {
    mode: WindowMode,
    window: Option<Window>,
}

impl Windower {
    pub fn new(mode: WindowMode) -> Self {
        Self { mode, window: None }
    }

    /// The window, once the first timestamp has been seen.
    ///
    /// In [`WindowMode::All`] the end tracks the latest admitted timestamp.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Decide whether a record with this timestamp is exported.
    pub fn admit(&mut self, timestamp: NaiveDateTime) -> Result<Admission, PlotError> {
        let current = match self.window {
            Some(window) => window,
            None => self.mode.establish(timestamp)?,
        };
        let window = self.window.insert(current);

        match self.mode {
            WindowMode::All => {
                window.end = timestamp;
                Ok(Admission::Emit)
            }
            WindowMode::Bounded { .. } if timestamp > window.end => Ok(Admission::Stop),
            WindowMode::Bounded { .. } if timestamp > window.start => Ok(Admission::Emit),
            WindowMode::Bounded { .. } => Ok(Admission::Skip),
        }
    }
}
