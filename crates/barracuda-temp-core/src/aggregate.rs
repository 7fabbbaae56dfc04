//! Folds per-sensor verdicts into one status.

use crate::evaluate::Verdict;
use crate::sensor::SensorKind;
use crate::Severity;

/// Final status of a check run, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub severity: Severity,
    /// First line, e.g. `OK - 2 fans / CPU: 35.0 *C`.
    pub summary_line: String,
    /// One newline-prefixed line per sensor, or empty.
    pub extended_block: String,
    /// Space-separated `name=value` tokens, or empty.
    pub perfdata_string: String,
}

impl AggregateResult {
    /// Result for a run that found nothing to check.
    pub fn no_sensors() -> Self {
        Self {
            severity: Severity::Unknown,
            summary_line: format!("{} - No sensors found", Severity::Unknown),
            extended_block: String::new(),
            perfdata_string: String::new(),
        }
    }
}

/// Running totals while folding verdicts.
#[derive(Debug, Default)]
struct Accumulator {
    severity: Severity,
    fragments: Vec<String>,
    fan_count: usize,
    temperatures: Vec<String>,
    extended_block: String,
    perf_tokens: String,
}

impl Accumulator {
    fn push(mut self, verdict: &Verdict) -> Self {
        self.severity = self.severity.max(verdict.severity);
        if let Some(fragment) = &verdict.message_fragment {
            self.fragments.push(fragment.clone());
        }

        match verdict.counted_kind {
            Some(SensorKind::Fan) => self.fan_count += 1,
            Some(SensorKind::Temperature) => self.temperatures.push(verdict.detail_line.clone()),
            _ => {}
        }

        if !verdict.detail_line.is_empty() {
            self.extended_block.push('\n');
            self.extended_block.push_str(&verdict.detail_line);
        }
        if let Some(token) = &verdict.perf_token {
            self.perf_tokens.push_str(token);
        }
        self
    }

    fn finish(self) -> AggregateResult {
        let perfdata_string = self.perf_tokens.trim_end().to_string();

        if self.severity > Severity::Ok {
            return AggregateResult {
                severity: self.severity,
                summary_line: format!("{} - {}", self.severity, self.fragments.join(", ")),
                extended_block: self.extended_block,
                perfdata_string,
            };
        }

        let mut clauses = Vec::new();
        if self.fan_count > 0 {
            let label = if self.fan_count > 1 { "fans" } else { "fan" };
            clauses.push(format!("{} {}", self.fan_count, label));
        }
        if !self.temperatures.is_empty() {
            clauses.push(self.temperatures.join(", "));
        }

        if clauses.is_empty() {
            return AggregateResult::no_sensors();
        }

        AggregateResult {
            severity: Severity::Ok,
            summary_line: format!("{} - {}", Severity::Ok, clauses.join(" / ")),
            extended_block: self.extended_block,
            perfdata_string,
        }
    }
}

/// Aggregates verdicts in sensor order.
///
/// The worst severity wins. Once anything fired, the summary lists every
/// fired fragment; otherwise it lists the fan count and each temperature.
/// With no matching sensor at all the result is UNKNOWN.
pub fn aggregate<'a, I>(verdicts: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a Verdict>,
{
    verdicts
        .into_iter()
        .fold(Accumulator::default(), Accumulator::push)
        .finish()
}
