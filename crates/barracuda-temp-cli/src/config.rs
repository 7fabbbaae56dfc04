//! Optional configuration file.
//!
//! Holds site-wide SNMP defaults so they need not be repeated in every
//! service definition. Command-line flags take precedence.

use anyhow::{Context, Result};
use barracuda_temp_core::transport::{DEFAULT_COMMUNITY, DEFAULT_SNMPWALK, DEFAULT_TIMEOUT_SECS};
use barracuda_temp_core::{SnmpVersion, SENSOR_TABLE_OID};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SNMP client settings
    #[serde(default)]
    pub snmp: SnmpConfig,
}

/// SNMP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpConfig {
    /// Path to the snmpwalk binary
    #[serde(default = "default_snmpwalk")]
    pub snmpwalk: String,

    /// Community string
    #[serde(default = "default_community")]
    pub community: String,

    /// Protocol version, "1" or "2c"
    #[serde(default = "default_version")]
    pub version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Root of the sensor table
    #[serde(default = "default_base_oid")]
    pub base_oid: String,
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            snmpwalk: default_snmpwalk(),
            community: default_community(),
            version: default_version(),
            timeout: default_timeout(),
            base_oid: default_base_oid(),
        }
    }
}

impl SnmpConfig {
    /// Parsed protocol version.
    pub fn snmp_version(&self) -> Result<SnmpVersion> {
        self.version
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid snmp.version in configuration")
    }
}

// Default value functions
fn default_snmpwalk() -> String {
    DEFAULT_SNMPWALK.to_string()
}

fn default_community() -> String {
    DEFAULT_COMMUNITY.to_string()
}

fn default_version() -> String {
    SnmpVersion::default().to_string()
}

fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT_SECS
}

fn default_base_oid() -> String {
    SENSOR_TABLE_OID.to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read configuration file {}", path.as_ref().display())
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }
}
