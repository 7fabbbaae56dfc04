//! Barracuda Temperature Check Library
//!
//! Evaluates the fan and temperature sensors of Barracuda firewalls,
//! read over SNMP, and renders the result as monitoring plugin output.
//!
//! Data flows transport → [`SensorCollector`] → [`evaluate`] per sensor →
//! [`aggregate`] → [`PluginOutput`].

pub mod aggregate;
pub mod collector;
pub mod error;
pub mod evaluate;
pub mod output;
pub mod sensor;
pub mod severity;
pub mod transport;

pub use aggregate::{aggregate, AggregateResult};
pub use collector::{SensorCollector, SENSOR_TABLE_OID};
pub use error::{Error, Result};
pub use evaluate::{evaluate, EvaluationPolicy, ObjectFilter, Thresholds, Verdict};
pub use output::PluginOutput;
pub use sensor::{SensorKind, SensorRecord};
pub use severity::Severity;
pub use transport::{ConnectionParams, SnmpTransport, SnmpVersion, SnmpWalk};

/// Runs one check against the sensor table rooted at `base_oid`.
///
/// Fails with [`Error::MissingTarget`] before touching the transport when
/// no hostname is set, and with [`Error::InvalidValue`] when a sensor the
/// filter selects has an unreadable temperature.
pub fn run_check<T: SnmpTransport>(
    transport: &T,
    base_oid: &str,
    params: &ConnectionParams,
    policy: &EvaluationPolicy,
) -> Result<AggregateResult> {
    if params.hostname.trim().is_empty() {
        return Err(Error::MissingTarget);
    }

    let records = SensorCollector::with_base_oid(transport, base_oid).collect(params)?;
    let verdicts = records
        .iter()
        .filter(|record| policy.filter.matches(record.kind))
        .map(|record| {
            record.require_reading()?;
            Ok(evaluate(record, policy))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(aggregate(&verdicts))
}
