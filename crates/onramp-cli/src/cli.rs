//! Command-line definitions.

use std::fmt;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use onramp_wizard::WizardStep;

/// Onramp: social platform account onboarding
#[derive(Parser, Debug)]
#[command(name = "onramp", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ONRAMP_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the supported platforms
    Platforms,

    /// List the site routes
    Routes,

    /// Run the signup wizard non-interactively
    Signup(SignupArgs),

    /// Inspect signup attempts of the current identity
    Attempts {
        #[command(subcommand)]
        action: AttemptsAction,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// How to reach the backend.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Use in-memory backends instead of the hosted one
    #[arg(long)]
    pub offline: bool,

    /// Sign in with this account instead of anonymously
    #[arg(long, env = "ONRAMP_USER", requires = "password")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(long, env = "ONRAMP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl BackendArgs {
    /// Account credentials, when both parts are given.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.user.as_deref()?, self.password.as_deref()?))
    }
}

/// Arguments of `onramp signup`.
#[derive(Args, Debug, Clone)]
pub struct SignupArgs {
    /// Professional email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Company name
    #[arg(long, default_value = "")]
    pub company: String,

    /// Company website
    #[arg(long, default_value = "")]
    pub website: String,

    /// Social handle of the company account
    #[arg(long, default_value = "")]
    pub handle: String,

    /// Platform to set up, optionally with an account option (`red=create`)
    #[arg(long = "platform", value_name = "KEY[=OPTION]")]
    pub platforms: Vec<PlatformArg>,

    /// Last wizard step to persist
    #[arg(long, default_value = "payment", value_parser = parse_step)]
    pub through: WizardStep,

    #[command(flatten)]
    pub backend: BackendArgs,
}

/// `attempts` subcommands.
#[derive(Subcommand, Debug)]
pub enum AttemptsAction {
    /// List attempts, newest first
    List {
        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Show one attempt
    Show {
        /// Attempt id
        id: String,

        #[command(flatten)]
        backend: BackendArgs,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Print one value by dotted key (e.g. `backend.url`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// A `--platform` value: platform key plus optional account option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformArg {
    /// Platform key
    pub key: String,
    /// Account option
    pub option: Option<String>,
}

impl FromStr for PlatformArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, option) = match s.split_once('=') {
            Some((key, option)) => (key.trim(), Some(option.trim())),
            None => (s.trim(), None),
        };
        if key.is_empty() {
            return Err(format!("missing platform key in '{s}'"));
        }
        Ok(Self {
            key: key.to_string(),
            option: option.filter(|o| !o.is_empty()).map(str::to_string),
        })
    }
}

impl fmt::Display for PlatformArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.option {
            Some(option) => write!(f, "{}={option}", self.key),
            None => f.write_str(&self.key),
        }
    }
}

fn parse_step(s: &str) -> Result<WizardStep, String> {
    s.parse().map_err(|e: onramp_core::Error| e.to_string())
}
