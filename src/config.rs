//! # Configuration
//!
//! Command line options (clap builder API) and the [`ShopConfig`] they produce.
//!
//! | option | short | range | default |
//! |---|---|---|---|
//! | `--barbers` | `-b` | 1..=49 | 3 |
//! | `--chairs` | `-w` | 1..=1000 | 2 |
//! | `--customers` | `-c` | 1..=1000 | 10 |
//! | `--rate` | `-r` | 1..=10000 ms | 1000 |
//! | `--seed` | | any | random |
//! | `--json` | | flag | off |

use crate::error::ShopError;
use crate::names::BARBER_NAMES;
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::{Deserialize, Serialize};
use shop_registry::ShopLimits;

pub const DEFAULT_BARBERS: usize = 3;
pub const DEFAULT_CHAIRS: usize = 2;
pub const DEFAULT_CUSTOMERS: usize = 10;
pub const DEFAULT_RATE_MS: u64 = 1000;

const MAX_CHAIRS: u64 = 1000;
const MAX_CUSTOMERS: u64 = 1000;
const MAX_RATE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    pub barbers: usize,
    pub chairs: usize,
    pub customers: usize,
    /// Mean inter-arrival time in milliseconds.
    pub rate_ms: u64,
    /// Arrival generator seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            barbers: DEFAULT_BARBERS,
            chairs: DEFAULT_CHAIRS,
            customers: DEFAULT_CUSTOMERS,
            rate_ms: DEFAULT_RATE_MS,
            seed: None,
        }
    }
}

impl ShopConfig {
    /// Re-checks the bounds the command line enforces, for configs built in code.
    pub fn validate(&self) -> Result<(), ShopError> {
        check("barbers", self.barbers as u64, BARBER_NAMES.len() as u64)?;
        check("chairs", self.chairs as u64, MAX_CHAIRS)?;
        check("customers", self.customers as u64, MAX_CUSTOMERS)?;
        check("rate", self.rate_ms, MAX_RATE_MS)
    }

    pub fn limits(&self) -> ShopLimits {
        ShopLimits {
            barbers: self.barbers,
            chairs: self.chairs,
            visitors: self.customers,
        }
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            barbers: matches.get_one::<usize>("barbers").copied().unwrap_or(defaults.barbers),
            chairs: matches.get_one::<usize>("chairs").copied().unwrap_or(defaults.chairs),
            customers: matches
                .get_one::<usize>("customers")
                .copied()
                .unwrap_or(defaults.customers),
            rate_ms: matches.get_one::<u64>("rate").copied().unwrap_or(defaults.rate_ms),
            seed: matches.get_one::<u64>("seed").copied(),
        }
    }
}

fn check(name: &str, value: u64, max: u64) -> Result<(), ShopError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ShopError::Config(format!(
            "{name} must be between 1 and {max}, got {value}"
        )))
    }
}

/// The command line definition.
pub fn command() -> Command {
    Command::new("barbershop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulates a barbershop and audits its synchronization protocol")
        .arg(
            Arg::new("barbers")
                .long("barbers")
                .short('b')
                .value_name("NUM")
                .help("Number of barbers")
                .default_value("3")
                .value_parser(
                    RangedU64ValueParser::<usize>::new().range(1..=BARBER_NAMES.len() as u64),
                ),
        )
        .arg(
            Arg::new("chairs")
                .long("chairs")
                .short('w')
                .value_name("NUM")
                .help("Number of chairs in the waiting room")
                .default_value("2")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..=MAX_CHAIRS)),
        )
        .arg(
            Arg::new("customers")
                .long("customers")
                .short('c')
                .value_name("NUM")
                .help("Number of customers visiting today")
                .default_value("10")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..=MAX_CUSTOMERS)),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .short('r')
                .value_name("MS")
                .help("Mean time between arrivals, in milliseconds")
                .default_value("1000")
                .value_parser(value_parser!(u64).range(1..=MAX_RATE_MS)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for the arrival generator")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Also print the closing report as JSON")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ArgMatches, clap::Error> {
        command().try_get_matches_from(std::iter::once("barbershop").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let matches = parse(&[]).unwrap();
        let config = ShopConfig::from_matches(&matches);
        assert_eq!(config, ShopConfig::default());
        assert!(!matches.get_flag("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_and_long_options() {
        let matches = parse(&[
            "-b", "5", "-w", "7", "--customers", "40", "-r", "20", "--seed", "9", "--json",
        ])
        .unwrap();
        let config = ShopConfig::from_matches(&matches);
        assert_eq!(
            config,
            ShopConfig {
                barbers: 5,
                chairs: 7,
                customers: 40,
                rate_ms: 20,
                seed: Some(9),
            }
        );
        assert!(matches.get_flag("json"));
        assert_eq!(config.limits().visitors, 40);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(parse(&["-b", "0"]).is_err());
        assert!(parse(&["-b", "50"]).is_err());
        assert!(parse(&["-b", "49"]).is_ok());
        assert!(parse(&["-w", "1001"]).is_err());
        assert!(parse(&["-c", "0"]).is_err());
        assert!(parse(&["-r", "10001"]).is_err());
        assert!(parse(&["-r", "abc"]).is_err());
    }

    #[test]
    fn test_validate_programmatic_config() {
        let config = ShopConfig {
            chairs: 0,
            ..ShopConfig::default()
        };
        assert!(matches!(config.validate(), Err(ShopError::Config(_))));

        let config = ShopConfig {
            barbers: 50,
            ..ShopConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_enforces_upper_bounds() {
        let too_big = [
            ShopConfig {
                chairs: MAX_CHAIRS as usize + 1,
                ..ShopConfig::default()
            },
            ShopConfig {
                customers: usize::MAX,
                ..ShopConfig::default()
            },
            ShopConfig {
                rate_ms: u64::MAX,
                ..ShopConfig::default()
            },
        ];
        for config in too_big {
            assert!(
                matches!(config.validate(), Err(ShopError::Config(_))),
                "accepted {config:?}"
            );
        }

        let largest = ShopConfig {
            barbers: BARBER_NAMES.len(),
            chairs: MAX_CHAIRS as usize,
            customers: MAX_CUSTOMERS as usize,
            rate_ms: MAX_RATE_MS,
            seed: None,
        };
        assert!(largest.validate().is_ok());
    }
}
