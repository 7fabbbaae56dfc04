//! Sensor readings as reported by the firewall's sensor table.
//!
//! Each physical sensor is described by three columns: a name, a type code
//! (`1` for fans, `2` for temperatures) and a raw integer value. Fans report
//! RPM, temperatures report millidegrees Celsius.

use crate::{Error, Result};

/// Millidegrees per degree Celsius.
const MILLI_PER_DEGREE: f64 = 1000.0;

/// Kind of sensor, derived from the SNMP type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Fan tachometer, value in RPM.
    Fan,
    /// Temperature probe, value in millidegrees Celsius.
    Temperature,
    /// Any other type code. Never evaluated or counted.
    Unrecognized,
}

impl SensorKind {
    /// Maps a raw SNMP type code to a sensor kind.
    pub fn from_type_code(code: &str) -> Self {
        match code {
            "1" => SensorKind::Fan,
            "2" => SensorKind::Temperature,
            _ => SensorKind::Unrecognized,
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorKind::Fan => write!(f, "fan"),
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// One sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Name as reported by the device, quotes stripped.
    pub name: String,
    /// Kind derived from the type code.
    pub kind: SensorKind,
    /// Value exactly as reported.
    pub raw_value: String,
    /// Degrees Celsius for temperatures, RPM for fans.
    /// `None` for unrecognized kinds and for values that do not parse.
    pub derived_value: Option<f64>,
}

impl SensorRecord {
    /// Builds a record from the three raw columns.
    ///
    /// Never fails: a value that does not parse leaves `derived_value` unset.
    pub fn new(name: &str, type_code: &str, raw_value: &str) -> Self {
        let kind = SensorKind::from_type_code(type_code);
        let derived_value = match kind {
            SensorKind::Fan => raw_value.parse::<i64>().ok().map(|rpm| rpm as f64),
            SensorKind::Temperature => raw_value
                .parse::<f64>()
                .ok()
                .map(|milli| milli / MILLI_PER_DEGREE),
            SensorKind::Unrecognized => None,
        };

        Self {
            name: name.to_string(),
            kind,
            raw_value: raw_value.to_string(),
            derived_value,
        }
    }

    /// Fails for a temperature sensor whose value is not numeric.
    pub fn require_reading(&self) -> Result<()> {
        match (self.kind, self.derived_value) {
            (SensorKind::Temperature, None) => Err(Error::InvalidValue {
                name: self.name.clone(),
                value: self.raw_value.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Returns true for a fan whose tachometer reads exactly zero.
    pub fn is_stalled_fan(&self) -> bool {
        self.kind == SensorKind::Fan && self.raw_value.parse::<i64>() == Ok(0)
    }

    /// Temperature in degrees Celsius, if this is a temperature sensor.
    pub fn celsius(&self) -> Option<f64> {
        match self.kind {
            SensorKind::Temperature => self.derived_value,
            _ => None,
        }
    }
}

/// Formats a temperature with at least one decimal place (`35.0`, `25.5`).
pub fn format_celsius(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
