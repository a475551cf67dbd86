use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use hdfs_bridge::config::{
    FlinkConfig, ResolveOptions, deserialize_hadoop_conf, resolve_with_report,
    serialize_hadoop_conf,
};
use hdfs_bridge::security::{AmbientSecurityContext, has_hdfs_delegation_token};
use hdfs_bridge::{init_logging, properties_json, render_properties};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve, transport and inspect Hadoop client configuration.
#[derive(Parser, Debug)]
#[command(name = "hdfs-bridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Process configuration inputs shared by the resolving commands.
#[derive(clap::Args, Debug)]
struct ProcessArgs {
    /// Process config file (`flink-conf.yaml` or `*.json5`)
    #[arg(long)]
    flink_conf: Option<PathBuf>,
    /// Extra process config entries, `key=value`; applied after the file
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    properties: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective Hadoop configuration
    Resolve {
        #[command(flatten)]
        process: ProcessArgs,
        /// Emit JSON including the resources that were added
        #[arg(long)]
        json: bool,
    },
    /// Serialize the effective Hadoop configuration
    Encode {
        #[command(flatten)]
        process: ProcessArgs,
        /// Write raw bytes to this file instead of base64 to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the properties held in a serialized configuration
    Decode {
        /// File holding the serialized configuration
        input: PathBuf,
        /// The file holds base64 text rather than raw bytes
        #[arg(long)]
        base64: bool,
    },
    /// Report whether the current user holds an HDFS delegation token
    HasToken,
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    debug!("parsed cli (command={:?})", cli.command);

    match cli.command {
        Command::Resolve { process, json } => {
            let flink = load_process_config(&process)?;
            let resolved = resolve_with_report(ResolveOptions::new(&flink));
            let rendered = if json {
                let value = properties_json(&resolved).context("failed to load configuration")?;
                format!("{}\n", serde_json::to_string_pretty(&value)?)
            } else {
                render_properties(&resolved.configuration)
                    .context("failed to load configuration")?
            };
            io::stdout().write_all(rendered.as_bytes())?;
        }
        Command::Encode { process, output } => {
            let flink = load_process_config(&process)?;
            let resolved = resolve_with_report(ResolveOptions::new(&flink));
            let Some(bytes) = serialize_hadoop_conf(&resolved.configuration)? else {
                bail!("failed to serialize hadoop configuration");
            };
            match output {
                Some(path) => {
                    fs::write(&path, &bytes)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(
                        "wrote serialized configuration (path={}, bytes={})",
                        path.display(),
                        bytes.len()
                    );
                }
                None => println!("{}", STANDARD.encode(&bytes)),
            }
        }
        Command::Decode { input, base64 } => {
            let raw = fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let bytes = if base64 {
                let text = String::from_utf8(raw).context("base64 input is not utf-8")?;
                STANDARD
                    .decode(text.trim())
                    .context("invalid base64 input")?
            } else {
                raw
            };
            let Some(conf) = deserialize_hadoop_conf(&bytes)? else {
                bail!("failed to deserialize hadoop configuration");
            };
            let rendered = render_properties(&conf).context("failed to read configuration")?;
            io::stdout().write_all(rendered.as_bytes())?;
        }
        Command::HasToken => {
            let found = has_hdfs_delegation_token(&AmbientSecurityContext::new())
                .context("failed to resolve current user")?;
            println!("{found}");
            if !found {
                return Ok(ExitCode::from(1));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_process_config(args: &ProcessArgs) -> anyhow::Result<FlinkConfig> {
    let mut config = match args.flink_conf.as_ref() {
        Some(path) => FlinkConfig::load_from_path(path)
            .with_context(|| format!("failed to load process config {}", path.display()))?,
        None => FlinkConfig::new(),
    };
    for property in &args.properties {
        let Some((key, value)) = property.split_once('=') else {
            bail!("expected KEY=VALUE, got {property}");
        };
        config.set(key.trim(), value.trim());
    }
    Ok(config)
}
