//! # clima-calendar
//!
//! Decode CF-convention time coordinates into calendar dates.
//!
//! Climate models do not agree on a calendar: some use the real Gregorian
//! calendar, others a 365-day year without leap days, a 366-day year, or a
//! 360-day year of twelve 30-day months. Aggregating by month or year only
//! needs `(year, month, day)`, so decoding always happens in the file's own
//! calendar and never goes through a Gregorian timestamp.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["calendar attribute"] -->|"CfCalendar::parse()"| B["CfCalendar"]
//!     C["units attribute"] -->|"TimeUnits::parse()"| D["TimeUnits"]
//!     B --> E["decode_offsets()"]
//!     D --> E
//!     F["time values"] --> E
//!     E --> G["Vec of ModelDate"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use clima_calendar::{CfCalendar, TimeUnits, decode_offsets};
//!
//! let units = TimeUnits::parse("days since 1850-01-01").unwrap();
//! let calendar = CfCalendar::parse("noleap").unwrap();
//! let dates = decode_offsets(&units, calendar, &[0.5, 365.5]).unwrap();
//! assert_eq!(dates[1].year(), 1851);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `calendar` | Supported CF calendars and month lengths |
//! | `date` | Calendar-agnostic `(year, month, day)` date |
//! | `units` | `"<unit> since <reference>"` parsing |
//! | `decode` | Offset to date conversion |
//! | `sequence` | Daily date sequences (fixtures, gap checks) |
//! | `error` | Error types |

mod calendar;
mod date;
mod decode;
mod error;
mod sequence;
mod units;

pub use calendar::CfCalendar;
pub use date::ModelDate;
pub use decode::{decode_offsets, shift_days};
pub use error::CalendarError;
pub use sequence::daily_sequence;
pub use units::{TimeUnit, TimeUnits};
