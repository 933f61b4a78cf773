//! Value types shared by health record things.
//!
//! Dates and times come in two flavours: *approximate* values, where only the
//! leading components are mandatory (`2020`, `2020-05`), and *health service*
//! values, which are fully specified. Both order component-wise with unset
//! components sorting first.
//!
//! ```rust
//! use hrecord_types::ApproximateDate;
//!
//! let year = ApproximateDate::new(2020).unwrap();
//! let may = ApproximateDate::with_month(2020, 5).unwrap();
//! assert!(year < may);
//! ```

#![forbid(unsafe_code)]

pub mod blob;
mod claims;
mod coded;
mod date_time;
mod dates;
mod measurement;
mod person;
mod times;

pub use blob::{Blob, BlobHashInfo, HashAlgorithm};
pub use claims::ClaimAmounts;
pub use coded::{CodableValue, CodedValue};
pub use date_time::{ApproximateDateTime, DurationValue, HealthServiceDateTime};
pub use dates::{ApproximateDate, HealthServiceDate};
pub use measurement::{DisplayValue, Length};
pub use person::{Name, Organization, PersonItem};
pub use times::ApproximateTime;
