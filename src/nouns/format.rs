//! Register formatting helpers.

pub const BLANK_REGISTER: &str = "bbbbb";

/// Round to `places` decimals and drop the decimal point.
///
/// `fixed_digits(12.345, 1)` is `"123"`; the reader recovers the value from
/// the implied decimal position.
pub fn fixed_digits(value: f64, places: usize) -> String {
    format!("{:.*}", places, value).replace('.', "")
}

/// Integer part only, truncated toward zero.
pub fn whole_digits(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

/// Left-pad with zeros up to `width` characters.
pub fn zero_pad(digits: &str, width: usize) -> String {
    format!("{:0>width$}", digits, width = width)
}

/// A duration split by repeated floor division.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: f64,
}

impl Clock {
    /// Days, hours (0-23), minutes and fractional seconds.
    pub fn with_days(total_seconds: f64) -> Self {
        let clock = Self::with_hours(total_seconds);
        Self {
            days: clock.hours / 24,
            hours: clock.hours % 24,
            ..clock
        }
    }

    /// Unbounded hours, minutes and fractional seconds.
    ///
    /// The total is rounded to hundredths before splitting, so seconds never
    /// display as `60.00` without the minutes carrying.
    pub fn with_hours(total_seconds: f64) -> Self {
        let centiseconds = (total_seconds.abs() * 100.0).round() as u64;
        let total_minutes = centiseconds / 6000;

        Self {
            days: 0,
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            seconds: (centiseconds % 6000) as f64 / 100.0,
        }
    }

    pub fn whole_seconds(&self) -> u64 {
        self.seconds.trunc() as u64
    }
}

/// `-mmbss` countdown register.
pub fn countdown_minutes_seconds(total_seconds: f64) -> String {
    let clock = Clock::with_hours(total_seconds);
    format!("-{:02}b{:02}", clock.minutes, clock.whole_seconds())
}
