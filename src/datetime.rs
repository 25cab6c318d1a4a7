//! Bindings for `chrono` date and time types.
//!
//! Dates and times serialize as a single ISO 8601 string scalar rather than
//! as their component fields:
//!
//! | Type | Format | Example |
//! |---|---|---|
//! | `NaiveDate` | `%Y-%m-%d` | `2021-10-29` |
//! | `NaiveTime` | `%H:%M:%S%.f` | `08:30:00.250` |
//! | `NaiveDateTime` | `%Y-%m-%dT%H:%M:%S%.f` | `2021-10-29T08:30:00` |
//! | `DateTime<Tz>` | RFC 3339 | `2021-10-29T08:30:00+00:00` |
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shape_ir::{serialize, Value};
//!
//! let date = NaiveDate::from_ymd_opt(2021, 10, 29).unwrap();
//! assert_eq!(serialize(&date).unwrap(), Value::from("2021-10-29"));
//! ```

use crate::{strategy, Category, Result, Serializable, Serializer, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

crate::serializer! {
    NaiveDate => |date| Ok(strategy::string(&date.format(DATE_FORMAT).to_string()));
    NaiveTime => |time| Ok(strategy::string(&time.format(TIME_FORMAT).to_string()));
    NaiveDateTime => |datetime| Ok(strategy::string(&datetime.format(DATETIME_FORMAT).to_string()));
}

// Generic over the time zone, so bound by hand rather than through the macro.
impl<Tz> Serializable for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    const CATEGORY: Category = Category::UserSerializable;

    fn to_value(&self, serializer: &Serializer) -> Result<Value> {
        strategy::custom(self, serializer, |datetime, _| {
            Ok(strategy::string(&datetime.to_rfc3339()))
        })
    }
}
