use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use xp_inbound_form::config::{Cli, Command, Config};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = match &cli.command {
        Command::Parse => {
            let wire = read_input(&cli.config)?;
            serde_json::to_value(xp_inbound_form::parse(&wire))?
        }
        Command::Serialize => {
            let form: xp_inbound_form::InboundForm =
                serde_json::from_value(read_input(&cli.config)?)
                    .context("input is not a valid inbound form")?;
            xp_inbound_form::serialize_value(&form)?
        }
        Command::Defaults(args) => serde_json::to_value(xp_inbound_form::defaults(args.protocol))?,
        Command::Normalize => {
            let wire = read_input(&cli.config)?;
            let form = xp_inbound_form::parse(&wire);
            info!(tag = %form.tag, protocol = %form.protocol, "normalized inbound");
            xp_inbound_form::serialize_value(&form)?
        }
    };

    write_output(&output, cli.config.compact)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn read_input(config: &Config) -> Result<Value> {
    let raw = if config.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        buf
    } else {
        std::fs::read_to_string(&config.input)
            .with_context(|| format!("read {}", config.input.display()))?
    };
    serde_json::from_str(&raw).context("input is not valid JSON")
}

fn write_output(value: &Value, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
