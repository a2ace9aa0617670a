//! Forecast date and lead time.
//!
//! `DATE-DES-DONNEES` holds 11 unsigned words:
//! ```text
//! [0] year  [1] month  [2] day  [3] hour  [4] minute
//! [5] lead-time unit code  [6] lead-time value  [7..10] unused here
//! ```
//! When the optional `DATX-DES-DONNEES` field exists (same width), its word 2
//! gives the time of day in seconds and replaces hour/minute.

use std::fmt;
use std::io::{Read, Seek};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use log::debug;

use crate::fa::format::catalog::FieldCatalog;
use crate::fa::format::content;
use crate::fa::types::error::{FaError, Result};
use crate::fa::types::models::LeadUnit;
use crate::fa::utils;

pub const DATE_FIELD: &str = "DATE-DES-DONNEES";
pub const DATX_FIELD: &str = "DATX-DES-DONNEES";

const DATE_WORDS: usize = 11;

/// Where the time of day of the base date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Hour and minute of the primary date field.
    HourMinute,
    /// Seconds of day from the extended date field.
    SecondsOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadTime {
    pub value: u64,
    pub unit: LeadUnit,
}

impl LeadTime {
    pub fn duration(&self) -> Option<TimeDelta> {
        let value = i64::try_from(self.value).ok()?;
        TimeDelta::try_seconds(value.checked_mul(self.unit.seconds())?)
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Forecast base date/time with its lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastTime {
    pub base: NaiveDateTime,
    pub lead: LeadTime,
    pub time_source: TimeSource,
}

impl ForecastTime {
    /// Validity time, base plus lead. `None` if it does not fit a timestamp.
    pub fn validity(&self) -> Option<NaiveDateTime> {
        self.base.checked_add_signed(self.lead.duration()?)
    }
}

impl fmt::Display for ForecastTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} + {}", self.base.format("%Y-%m-%dT%H:%MZ"), self.lead)
    }
}

/// Decodes the forecast date/time from the catalogued date fields.
pub fn decode<R: Read + Seek>(file: &mut R, catalog: &FieldCatalog) -> Result<ForecastTime> {
    let date = read_date_words(file, catalog, DATE_FIELD)?;
    let (year, month, day, hour, minute) = (date[0], date[1], date[2], date[3], date[4]);

    let lead = LeadTime {
        value: date[6],
        unit: LeadUnit::try_from(date[5])?,
    };

    let midnight = calendar_date(year, month, day)?.and_time(NaiveTime::MIN);

    let (seconds, time_source) = if catalog.contains(DATX_FIELD) {
        let datx = read_date_words(file, catalog, DATX_FIELD)?;
        (datx[2], TimeSource::SecondsOfDay)
    } else {
        let minutes = hour.saturating_mul(60).saturating_add(minute);
        (minutes.saturating_mul(60), TimeSource::HourMinute)
    };
    debug!("Forecast base {} plus {} s ({:?}), lead {}", midnight, seconds, time_source, lead);

    let base = i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|offset| midnight.checked_add_signed(offset))
        .ok_or_else(|| FaError::InvalidFormat(format!("Time of day of {} seconds is out of range", seconds)))?;

    Ok(ForecastTime {
        base,
        lead,
        time_source,
    })
}

fn read_date_words<R: Read + Seek>(file: &mut R, catalog: &FieldCatalog, name: &str) -> Result<Vec<u64>> {
    let field = catalog.require(name)?;
    let bytes = content::read_field(file, &field.location)?;
    utils::decode_words(name, &bytes, DATE_WORDS)
}

fn calendar_date(year: u64, month: u64, day: u64) -> Result<NaiveDate> {
    let invalid = || FaError::InvalidDate { year, month, day };
    let y = i32::try_from(year).map_err(|_| invalid())?;
    let m = u32::try_from(month).map_err(|_| invalid())?;
    let d = u32::try_from(day).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}
