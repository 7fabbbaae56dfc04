//! SNMP transport.
//!
//! The check does not speak SNMP itself. It delegates each walk to an
//! external client and reads back one value per line.

use crate::{Error, Result};
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;
use tracing::{debug, warn};

/// Default location of the net-snmp walk tool.
pub const DEFAULT_SNMPWALK: &str = "/usr/bin/snmpwalk";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Default community string.
pub const DEFAULT_COMMUNITY: &str = "public";

/// SNMP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnmpVersion {
    /// SNMPv1.
    V1,
    /// SNMPv2c.
    #[default]
    V2c,
}

impl SnmpVersion {
    /// Value passed to the client's `-v` flag.
    pub fn as_arg(&self) -> &'static str {
        match self {
            SnmpVersion::V1 => "1",
            SnmpVersion::V2c => "2c",
        }
    }
}

impl FromStr for SnmpVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "v1" => Ok(SnmpVersion::V1),
            "2c" | "v2c" => Ok(SnmpVersion::V2c),
            _ => Err(format!("unsupported SNMP version: {}", s)),
        }
    }
}

impl std::fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Where and how to reach the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub hostname: String,
    pub community: String,
    pub version: SnmpVersion,
    pub timeout_secs: u32,
}

impl ConnectionParams {
    /// Creates parameters for `hostname` with default community, version and timeout.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            community: DEFAULT_COMMUNITY.to_string(),
            version: SnmpVersion::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Something that can walk an OID branch and return one line per entry.
pub trait SnmpTransport {
    /// Walks `oid` on the device. Lines are returned in device order,
    /// not yet trimmed or unquoted.
    fn walk(&self, params: &ConnectionParams, oid: &str) -> Result<Vec<String>>;
}

/// Transport that shells out to `snmpwalk`.
#[derive(Debug, Clone)]
pub struct SnmpWalk {
    program: PathBuf,
}

impl SnmpWalk {
    /// Creates a transport running the given `snmpwalk` binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, params: &ConnectionParams, oid: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-v")
            .arg(params.version.as_arg())
            .arg("-c")
            .arg(&params.community)
            // quick print, values only, numeric enums and timeticks, no units
            .arg("-OqevtU")
            .arg("-t")
            .arg(params.timeout_secs.to_string())
            .arg(&params.hostname)
            .arg(oid);
        cmd
    }
}

impl Default for SnmpWalk {
    fn default() -> Self {
        Self::new(DEFAULT_SNMPWALK)
    }
}

impl SnmpTransport for SnmpWalk {
    fn walk(&self, params: &ConnectionParams, oid: &str) -> Result<Vec<String>> {
        debug!(
            program = %self.program.display(),
            host = %params.hostname,
            version = %params.version,
            oid,
            "Running SNMP walk"
        );

        let output = self
            .command(params, oid)
            .output()
            .map_err(|e| {
                let reason = format!("could not run {}: {}", self.program.display(), e);
                warn!(oid, %reason, "SNMP walk failed");
                Error::Transport {
                    oid: oid.to_string(),
                    reason,
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = match output.status.code() {
                Some(code) if stderr.is_empty() => format!("exit status {}", code),
                Some(code) => format!("exit status {}: {}", code, stderr),
                None => "terminated by signal".to_string(),
            };
            warn!(oid, %reason, "SNMP walk failed");
            return Err(Error::Transport {
                oid: oid.to_string(),
                reason,
            });
        }

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        debug!(oid, lines = lines.len(), "SNMP walk complete");
        Ok(lines)
    }
}
