//! Sensor table collection.

use crate::sensor::SensorRecord;
use crate::transport::{ConnectionParams, SnmpTransport};
use crate::{Error, Result};
use tracing::debug;

/// Base OID of the Barracuda sensor table.
pub const SENSOR_TABLE_OID: &str = ".1.3.6.1.4.1.10704.1.4.1";

/// Column holding the sensor name.
pub const NAME_BRANCH: &str = ".1";
/// Column holding the type code.
pub const TYPE_BRANCH: &str = ".2";
/// Column holding the raw value.
pub const VALUE_BRANCH: &str = ".3";

/// Walks the name, type and value columns and zips them into records.
pub struct SensorCollector<'a, T: SnmpTransport> {
    transport: &'a T,
    base_oid: String,
}

impl<'a, T: SnmpTransport> SensorCollector<'a, T> {
    /// Creates a collector for the standard sensor table.
    pub fn new(transport: &'a T) -> Self {
        Self::with_base_oid(transport, SENSOR_TABLE_OID)
    }

    /// Creates a collector rooted at a different table OID.
    pub fn with_base_oid(transport: &'a T, base_oid: impl Into<String>) -> Self {
        Self {
            transport,
            base_oid: base_oid.into(),
        }
    }

    /// Collects every sensor on the device, in table order.
    pub fn collect(&self, params: &ConnectionParams) -> Result<Vec<SensorRecord>> {
        let names = self.walk_column(params, NAME_BRANCH)?;
        let types = self.walk_column(params, TYPE_BRANCH)?;
        let values = self.walk_column(params, VALUE_BRANCH)?;

        if names.len() != types.len() || names.len() != values.len() {
            return Err(Error::MalformedResponse {
                names: names.len(),
                types: types.len(),
                values: values.len(),
            });
        }

        let records = names
            .iter()
            .zip(&types)
            .zip(&values)
            .map(|((name, type_code), value)| SensorRecord::new(name, type_code, value))
            .collect::<Vec<_>>();

        debug!(count = records.len(), "Collected sensor records");
        Ok(records)
    }

    fn walk_column(&self, params: &ConnectionParams, branch: &str) -> Result<Vec<String>> {
        let oid = format!("{}{}", self.base_oid, branch);
        let lines = self.transport.walk(params, &oid)?;
        Ok(lines.iter().map(|line| clean_field(line)).collect())
    }
}

/// Strips surrounding whitespace and every double-quote character.
pub fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sensor::SensorKind;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// In-memory transport keyed by OID.
    pub(crate) struct FakeTransport {
        pub columns: HashMap<String, Vec<String>>,
        pub calls: Cell<usize>,
    }

    impl FakeTransport {
        pub fn new(names: &[&str], types: &[&str], values: &[&str]) -> Self {
            let column = |branch: &str, lines: &[&str]| {
                (
                    format!("{}{}", SENSOR_TABLE_OID, branch),
                    lines.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                )
            };
            Self {
                columns: HashMap::from([
                    column(NAME_BRANCH, names),
                    column(TYPE_BRANCH, types),
                    column(VALUE_BRANCH, values),
                ]),
                calls: Cell::new(0),
            }
        }
    }

    impl SnmpTransport for FakeTransport {
        fn walk(&self, _params: &ConnectionParams, oid: &str) -> Result<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            self.columns.get(oid).cloned().ok_or_else(|| Error::Transport {
                oid: oid.to_string(),
                reason: "Timeout: No Response from localhost".to_string(),
            })
        }
    }

    #[test]
    fn test_clean_field() {
        assert_eq!(clean_field("  \"CPU Temp\"  "), "CPU Temp");
        assert_eq!(clean_field("Fan \"A\""), "Fan A");
        assert_eq!(clean_field("35000\n"), "35000");
    }

    #[test]
    fn test_collect_zips_columns() {
        let transport = FakeTransport::new(
            &["\"Fan 1\"", "\"CPU Temp\""],
            &["1", "2"],
            &["4200", "35000"],
        );
        let records = SensorCollector::new(&transport)
            .collect(&ConnectionParams::new("fw"))
            .unwrap();

        assert_eq!(transport.calls.get(), 3);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Fan 1");
        assert_eq!(records[0].kind, SensorKind::Fan);
        assert_eq!(records[1].name, "CPU Temp");
        assert_eq!(records[1].celsius(), Some(35.0));
    }

    #[test]
    fn test_length_mismatch_is_malformed() {
        let transport = FakeTransport::new(&["A", "B"], &["1", "2", "2"], &["1", "2", "3"]);
        let err = SensorCollector::new(&transport)
            .collect(&ConnectionParams::new("fw"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedResponse {
                names: 2,
                types: 3,
                values: 3
            }
        ));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let transport = FakeTransport::new(&["A"], &["1"], &["1"]);
        let err = SensorCollector::with_base_oid(&transport, ".1.3.6.1.4.1.9999")
            .collect(&ConnectionParams::new("fw"))
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_empty_table() {
        let transport = FakeTransport::new(&[], &[], &[]);
        let records = SensorCollector::new(&transport)
            .collect(&ConnectionParams::new("fw"))
            .unwrap();
        assert!(records.is_empty());
    }
}
