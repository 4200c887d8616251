//! DSKY Noun displays.
//!
//! A noun is a formatter addressed by a two-digit code. It reads live
//! telemetry through the [`Gateway`] and selected onboard-computer state, and
//! renders three fixed-width display registers. Registers carry digit
//! sequences only: the implied decimal position of each register is given by
//! its tooltip, and `b` stands for a blank digit.

pub mod burn;
pub mod format;
pub mod navigation;
pub mod registry;
pub mod status;

pub use registry::{NounEntry, NounRegistry, Resolution};

use crate::computer::FlightComputer;
use crate::gateway::{Gateway, GatewayError};
use arrayvec::ArrayString;
use serde::{Serialize, Serializer};

pub const REGISTER_COUNT: usize = 3;

/// Two-character noun code, e.g. `09` or `36`.
///
/// Registered formatters always carry digits; any other pair of ASCII
/// alphanumerics is still a valid lookup key and resolves to a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NounCode(ArrayString<2>);

impl NounCode {
    pub fn new(code: &str) -> Result<Self, NounError> {
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(NounError::InvalidCode(code.to_string()));
        }
        ArrayString::from(code)
            .map(Self)
            .map_err(|_| NounError::InvalidCode(code.to_string()))
    }

    /// Code carried by a formatter type name, taken from its last two digits.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let start = name.len().checked_sub(2)?;
        let suffix = name.get(start..)?;
        if !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(suffix).ok()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Display for NounCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for NounCode {
    type Err = NounError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for NounCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Three display registers, their interpretation flag and per-register tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NounPayload {
    #[serde(rename = "1")]
    pub register_1: String,
    #[serde(rename = "2")]
    pub register_2: String,
    #[serde(rename = "3")]
    pub register_3: String,
    pub is_octal: bool,
    pub tooltips: [Option<&'static str>; REGISTER_COUNT],
}

impl NounPayload {
    pub fn new(
        registers: [String; REGISTER_COUNT],
        is_octal: bool,
        tooltips: [Option<&'static str>; REGISTER_COUNT],
    ) -> Self {
        let [register_1, register_2, register_3] = registers;
        Self {
            register_1,
            register_2,
            register_3,
            is_octal,
            tooltips,
        }
    }

    /// All registers blank, no tooltips.
    pub fn blank() -> Self {
        Self::new(
            [
                format::BLANK_REGISTER.to_string(),
                format::BLANK_REGISTER.to_string(),
                format::BLANK_REGISTER.to_string(),
            ],
            false,
            [None; REGISTER_COUNT],
        )
    }

    pub fn registers(&self) -> [&str; REGISTER_COUNT] {
        [&self.register_1, &self.register_2, &self.register_3]
    }
}

/// Result of asking a noun for its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NounReadout {
    Display(NounPayload),
    /// Preconditions unmet; the alarm has already been programmed.
    Alarm { code: u16 },
}

impl NounReadout {
    pub fn payload(&self) -> Option<&NounPayload> {
        match self {
            NounReadout::Display(payload) => Some(payload),
            NounReadout::Alarm { .. } => None,
        }
    }

    /// Payload to show, with blank registers standing in for an alarm.
    pub fn into_display(self) -> NounPayload {
        match self {
            NounReadout::Display(payload) => payload,
            NounReadout::Alarm { .. } => NounPayload::blank(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NounError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("noun {0} does not accept data")]
    ReadOnly(NounCode),
    #[error("invalid noun code `{0}`")]
    InvalidCode(String),
}

/// Collaborators handed to a formatter for one request.
pub struct NounContext<'a> {
    pub gateway: &'a Gateway,
    pub computer: &'a mut dyn FlightComputer,
}

impl<'a> NounContext<'a> {
    pub fn new(gateway: &'a Gateway, computer: &'a mut dyn FlightComputer) -> Self {
        Self { gateway, computer }
    }

    pub(crate) fn telemetry(&self, name: &str) -> Result<f64, GatewayError> {
        self.gateway.get_number(name)
    }
}

pub trait Noun: Send + Sync {
    fn description(&self) -> &str;

    fn return_data(&self, ctx: &mut NounContext<'_>) -> Result<NounReadout, NounError>;

    /// Whether this noun accepts ground-entered data.
    fn accepts_data(&self) -> bool {
        false
    }

    /// Overwrite the noun's slot in computer state.
    fn receive_data(
        &self,
        code: NounCode,
        _ctx: &mut NounContext<'_>,
        _data: Vec<String>,
    ) -> Result<(), NounError> {
        Err(NounError::ReadOnly(code))
    }
}
