use core::fmt::{self, Display};

/// The error type used by this library.
///
/// Every wait in the driver is bounded; when the controller never reports
/// idle within the configured poll budget the operation fails with
/// [`Error::Timeout`] instead of spinning forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The write-in-progress flag did not clear within the poll budget.
    Timeout,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout => f.write_str("EEPROM controller busy flag never cleared"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Timeout => defmt::write!(fmt, "Error::Timeout"),
        }
    }
}
