use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::protocol::Protocol;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "xp-inbound-form",
    about = "Convert Xray inbound configs to and from flat editor form state",
    version = crate::version::VERSION,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read a wire-format inbound and print its form state.
    Parse,

    /// Read a form state and print the wire-format inbound.
    Serialize,

    /// Print the default form state for a protocol.
    Defaults(DefaultsArgs),

    /// Parse then re-serialize a wire-format inbound.
    Normalize,
}

#[derive(Args, Debug, Clone)]
pub struct DefaultsArgs {
    #[arg(long, value_name = "PROTOCOL", default_value = "vless")]
    pub protocol: Protocol,
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// JSON input file; `-` reads stdin.
    #[arg(
        long,
        global = true,
        env = "XP_FORM_INPUT",
        value_name = "PATH",
        default_value = "-"
    )]
    pub input: PathBuf,

    #[arg(
        long,
        global = true,
        env = "XP_FORM_COMPACT",
        value_name = "BOOL",
        default_value_t = false,
        action = clap::ArgAction::Set,
        default_missing_value = "true",
        num_args = 0..=1,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub compact: bool,
}

impl Config {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
