//! Per-sensor threshold evaluation.
//!
//! Fans are critical when they stop. Temperatures are compared against
//! optional warning and critical levels in degrees Celsius, inclusive.
//! An unset level disables its rule; a level of `0` is a real level.

use crate::sensor::{format_celsius, SensorKind, SensorRecord};
use crate::Severity;
use std::str::FromStr;
use tracing::debug;

/// Which sensor kinds take part in the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFilter {
    /// Fans and temperatures.
    #[default]
    All,
    /// Fans only.
    FanOnly,
    /// Temperatures only.
    TemperatureOnly,
}

impl ObjectFilter {
    /// Returns true if sensors of `kind` are checked under this filter.
    pub fn matches(&self, kind: SensorKind) -> bool {
        match (self, kind) {
            (_, SensorKind::Unrecognized) => false,
            (ObjectFilter::All, _) => true,
            (ObjectFilter::FanOnly, SensorKind::Fan) => true,
            (ObjectFilter::TemperatureOnly, SensorKind::Temperature) => true,
            _ => false,
        }
    }
}

impl FromStr for ObjectFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ObjectFilter::All),
            "fan" => Ok(ObjectFilter::FanOnly),
            "temp" => Ok(ObjectFilter::TemperatureOnly),
            _ => Err(format!("unknown object: {} (expected all, temp or fan)", s)),
        }
    }
}

impl std::fmt::Display for ObjectFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectFilter::All => write!(f, "all"),
            ObjectFilter::FanOnly => write!(f, "fan"),
            ObjectFilter::TemperatureOnly => write!(f, "temp"),
        }
    }
}

/// Temperature levels in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thresholds {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
}

impl Thresholds {
    pub fn new(warning: Option<f64>, critical: Option<f64>) -> Self {
        Self { warning, critical }
    }
}

/// Everything the check needs besides the readings themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvaluationPolicy {
    pub filter: ObjectFilter,
    pub thresholds: Thresholds,
    pub perfdata: bool,
}

/// Result of evaluating one sensor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Verdict {
    pub severity: Severity,
    /// Set only when severity is not OK.
    pub message_fragment: Option<String>,
    /// Sensor kind, when the sensor matched the filter.
    pub counted_kind: Option<SensorKind>,
    /// Extended output line; empty when the sensor was excluded.
    pub detail_line: String,
    /// Set only for temperatures with perfdata enabled.
    pub perf_token: Option<String>,
}

impl Verdict {
    /// True if this sensor matched the filter and a recognized kind.
    pub fn contributes_to_count(&self) -> bool {
        self.counted_kind.is_some()
    }
}

/// Evaluates a single sensor under `policy`.
pub fn evaluate(record: &SensorRecord, policy: &EvaluationPolicy) -> Verdict {
    if !policy.filter.matches(record.kind) {
        return Verdict::default();
    }

    let mut verdict = Verdict {
        counted_kind: Some(record.kind),
        ..Verdict::default()
    };

    match record.kind {
        SensorKind::Fan => {
            if record.is_stalled_fan() {
                verdict.severity = Severity::Critical;
                verdict.message_fragment = Some(format!("{} is not working", record.name));
            }
            verdict.detail_line = format!("{}: {} RPM", record.name, record.raw_value);
        }
        SensorKind::Temperature => {
            // Unreadable temperatures are rejected before evaluation.
            let celsius = record.celsius().unwrap_or_default();
            let shown = format_celsius(celsius);

            let breached = match policy.thresholds {
                Thresholds {
                    critical: Some(crit),
                    ..
                } if celsius >= crit => Some(Severity::Critical),
                Thresholds {
                    warning: Some(warn),
                    ..
                } if celsius >= warn => Some(Severity::Warning),
                _ => None,
            };
            if let Some(severity) = breached {
                verdict.severity = severity;
                verdict.message_fragment = Some(format!("{} is {} *C", record.name, shown));
            }

            verdict.detail_line = format!("{}: {} *C", record.name, shown);
            if policy.perfdata {
                verdict.perf_token = Some(format!("{}={} ", record.name.replace(' ', "-"), shown));
            }
        }
        SensorKind::Unrecognized => {}
    }

    debug!(
        sensor = %record.name,
        kind = %record.kind,
        severity = %verdict.severity,
        "Evaluated sensor"
    );
    verdict
}
