//! Human friendly time intervals: `"1h34m26s134ms"`, `"1d/12h 15m 7s"`,
//! `"3d/12h_15m:12s---347ms"` or classic `"1.12:15:07"`.
//!
//! ```
//! use std::time::Duration;
//! use time_interval::TimeInterval;
//!
//! let duration = TimeInterval::parse("1h 12m127s").unwrap();
//! assert_eq!(duration, Duration::from_secs(3600 + 12 * 60 + 127));
//! ```

pub mod classic;
pub mod error;
pub mod interval;
pub mod logger;
pub mod serde_interval;
pub mod type_converter;

pub use error::{ConversionError, Error, Result};
pub use interval::{Segment, TimeInterval, Unit};
pub use type_converter::{
    BaseConverter, ConverterRegistry, Source, TimeIntervalTypeConverter, TypeConverter,
};
