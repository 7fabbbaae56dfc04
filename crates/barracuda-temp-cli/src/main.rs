//! Barracuda Temperature Check
//!
//! Monitoring plugin reporting the fan and temperature sensors of a
//! Barracuda firewall. Prints one status line, the per-sensor details and
//! optional performance data, and exits 0/1/2/3 for OK/WARNING/CRITICAL/UNKNOWN.

mod config;

use anyhow::Result;
use barracuda_temp_core::{
    run_check, ConnectionParams, EvaluationPolicy, ObjectFilter, PluginOutput, SnmpVersion,
    SnmpWalk, Thresholds,
};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

const BIN_NAME: &str = "check_barracuda_temperature";

#[derive(Parser, Debug)]
#[command(name = "check_barracuda_temperature")]
#[command(about = "Checks temperature and fan state of Barracuda firewalls over SNMP")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// IP or hostname of the firewall node running an SNMP service
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// SNMP community string [default: public]
    #[arg(short = 'C', long)]
    community: Option<String>,

    /// SNMP version, 1 or 2c [default: 2c]
    #[arg(short = 'V', long = "snmp-version")]
    snmp_version: Option<SnmpVersion>,

    /// Sensors to check: all, temp or fan
    #[arg(short = 'O', long, default_value_t = ObjectFilter::All)]
    object: ObjectFilter,

    /// Warning threshold for temperatures in degrees Celsius
    #[arg(short, long, allow_negative_numbers = true)]
    warning: Option<f64>,

    /// Critical threshold for temperatures in degrees Celsius
    #[arg(short, long, allow_negative_numbers = true)]
    critical: Option<f64>,

    /// Pass "yes" to append performance data
    #[arg(short = 'P', long)]
    perfdata: Option<String>,

    /// SNMP timeout in seconds [default: 30]
    #[arg(short = 'T', long)]
    timeout: Option<u32>,

    /// TOML file with SNMP defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: (),
}

impl Cli {
    fn perfdata_enabled(&self) -> bool {
        self.perfdata.as_deref() == Some("yes")
    }

    fn policy(&self) -> EvaluationPolicy {
        EvaluationPolicy {
            filter: self.object,
            thresholds: Thresholds::new(self.warning, self.critical),
            perfdata: self.perfdata_enabled(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return emit(PluginOutput::unknown(parse_error_message(&e))),
    };

    // Setup logging; stdout belongs to the plugin output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = run(&cli).unwrap_or_else(|e| PluginOutput::unknown(format!("{:#}", e)));
    emit(output)
}

fn run(cli: &Cli) -> Result<PluginOutput> {
    let hostname = match cli.hostname.as_deref().map(str::trim) {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Ok(PluginOutput::missing_target(BIN_NAME)),
    };

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    let params = ConnectionParams {
        hostname,
        community: cli
            .community
            .clone()
            .unwrap_or_else(|| config.snmp.community.clone()),
        version: match cli.snmp_version {
            Some(version) => version,
            None => config.snmp.snmp_version()?,
        },
        timeout_secs: cli.timeout.unwrap_or(config.snmp.timeout),
    };
    let policy = cli.policy();
    debug!(
        host = %params.hostname,
        version = %params.version,
        timeout = params.timeout_secs,
        ?policy,
        "Starting check"
    );

    let transport = SnmpWalk::new(&config.snmp.snmpwalk);
    let output = match run_check(&transport, &config.snmp.base_oid, &params, &policy) {
        Ok(result) => PluginOutput::render(&result, policy.perfdata),
        Err(e) => PluginOutput::from_error(&e, BIN_NAME),
    };
    Ok(output)
}

fn emit(output: PluginOutput) -> ExitCode {
    println!("{}", output.text);
    ExitCode::from(output.exit_code as u8)
}

/// First line of a clap error without its `error: ` prefix.
fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error: ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once(BIN_NAME).chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["-H", "fw"]);
        assert_eq!(cli.hostname.as_deref(), Some("fw"));
        assert_eq!(cli.object, ObjectFilter::All);
        assert_eq!(cli.snmp_version, None);
        assert_eq!(cli.policy(), EvaluationPolicy::default());
    }

    #[test]
    fn test_full_command_line() {
        let cli = parse(&[
            "-H", "fw", "-C", "secret", "-V", "1", "-O", "temp", "-w", "40", "-c", "0", "-P",
            "yes", "-T", "5",
        ]);
        assert_eq!(cli.community.as_deref(), Some("secret"));
        assert_eq!(cli.snmp_version, Some(SnmpVersion::V1));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(
            cli.policy(),
            EvaluationPolicy {
                filter: ObjectFilter::TemperatureOnly,
                thresholds: Thresholds::new(Some(40.0), Some(0.0)),
                perfdata: true,
            }
        );
    }

    #[test]
    fn test_perfdata_needs_exact_yes() {
        assert!(!parse(&["-H", "fw", "-P", "Yes"]).perfdata_enabled());
        assert!(!parse(&["-H", "fw", "-P", "1"]).perfdata_enabled());
        assert!(!parse(&["-H", "fw"]).perfdata_enabled());
    }

    #[test]
    fn test_negative_threshold() {
        let cli = parse(&["-H", "fw", "-w", "-5"]);
        assert_eq!(cli.warning, Some(-5.0));
    }

    #[test]
    fn test_invalid_arguments_are_errors() {
        let err = Cli::try_parse_from([BIN_NAME, "-O", "psu"]).unwrap_err();
        assert!(!parse_error_message(&err).starts_with("error:"));
        assert!(Cli::try_parse_from([BIN_NAME, "-w", "warm"]).is_err());
        assert!(Cli::try_parse_from([BIN_NAME, "-V", "3"]).is_err());
    }

    #[test]
    fn test_missing_hostname_short_circuits() {
        for args in [&[][..], &["-H", "  "][..]] {
            let output = run(&parse(args)).unwrap();
            assert_eq!(output.exit_code, 3);
            assert!(output
                .text
                .starts_with("UNKNOWN - Not all required arguments given\n"));
        }
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = parse(&["-H", "fw", "--config", "/nonexistent/barracuda.toml"]);
        assert!(run(&cli).is_err());
    }
}
