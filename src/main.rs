use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sandbox_tools::{init, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sandbox-tools")]
#[command(about = "Remote sandbox tools backed by Daytona or E2B")]
#[command(version)]
struct Cli {
    /// Path to config.toml (default: ~/.sandbox-tools/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the selected sandbox provider
    Provider,
    /// List the published tools
    Tools {
        /// Print full tool specs (name, description, parameter schema) as JSON
        #[arg(long)]
        json: bool,
    },
    /// Invoke a tool with JSON arguments
    Call {
        /// Tool name (snake_case, kebab-case or camelCase)
        tool: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries tool output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_overrides();
    let registry = init(&config)?;

    match cli.command {
        Commands::Provider => println!("{}", registry.provider()),
        Commands::Tools { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&registry.specs())?);
            } else {
                for (op, tool) in registry.iter() {
                    println!("{op:<18} {}", tool.description());
                }
            }
        }
        Commands::Call { tool, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("tool arguments must be valid JSON")?;
            let result = registry.execute(&tool, args).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
