use anyhow::Result;
use clap::{Parser, Subcommand};
use rpi2c_i2c::{ConfigLoader, I2cCommand, I2cExecutor, ServiceConfig};
use rpi2c_mcp::{McpServer, ServerConfig};
use rpi2c_web::AppState;
use tracing_subscriber::EnvFilter;

/// rpi2c - I2C command bridge for Raspberry Pi
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration directory (default: /etc/rpi2c)
    #[clap(long = "config-dir", env = "RPI2C_CONFIG_DIR")]
    config_dir: Option<String>,

    /// Enable verbose output
    #[clap(short, long)]
    verbose: bool,

    /// Subcommand to execute
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP bridge server
    Serve {
        /// Listen address, overriding the configuration
        #[clap(long)]
        listen: Option<String>,
    },
    /// Run the MCP server on stdio
    Mcp,
    /// Read a device register
    Get {
        /// I2C bus number
        bus: i32,
        /// Device address in hex format (e.g. 0x48)
        address: String,
        /// Register address in hex format (e.g. 0x00)
        register: String,
        /// Data mode: b, w, or "i N"
        #[clap(long)]
        mode: Option<String>,
    },
    /// Write a device register
    Set {
        /// I2C bus number
        bus: i32,
        /// Device address in hex format (e.g. 0x48)
        address: String,
        /// Register address in hex format (e.g. 0x00)
        register: String,
        /// Value to write in hex format (e.g. 0xFF)
        value: String,
        /// Data mode: b, w, or "i N"
        #[clap(long)]
        mode: Option<String>,
    },
    /// Print the MCP tool catalog
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the MCP stdio channel stays clean
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(args.config_dir.as_deref())?;

    match args.command {
        Some(Commands::Serve { listen }) => {
            let addr = listen.unwrap_or_else(|| config.listen.clone()).parse()?;
            let state = AppState::new(config.i2c.resolve_tools());
            rpi2c_web::serve(addr, state).await?;
        }
        Some(Commands::Mcp) => {
            let executor = I2cExecutor::new(config.i2c.resolve_tools());
            let server = McpServer::new(executor, ServerConfig::default());
            server.serve_stdio().await?;
        }
        Some(Commands::Get {
            bus,
            address,
            register,
            mode,
        }) => {
            let mut command = I2cCommand::read(bus, address, register);
            command.mode = mode;
            run_once(config, &command).await?;
        }
        Some(Commands::Set {
            bus,
            address,
            register,
            value,
            mode,
        }) => {
            let mut command = I2cCommand::write(bus, address, register, value);
            command.mode = mode;
            run_once(config, &command).await?;
        }
        Some(Commands::Tools) => {
            println!("{}", serde_json::to_string_pretty(&rpi2c_mcp::all_tools())?);
        }
        None => {
            println!("rpi2c - I2C command bridge");
            println!();
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn load_config(config_dir: Option<&str>) -> Result<ServiceConfig> {
    let loader = match config_dir {
        Some(dir) => ConfigLoader::new(dir),
        None => ConfigLoader::system(),
    };
    let config = loader.load()?;
    tracing::debug!(root = %loader.root().display(), "Configuration loaded");
    Ok(config)
}

/// Execute a single command and print the response; a failed operation
/// exits non-zero.
async fn run_once(config: ServiceConfig, command: &I2cCommand) -> Result<()> {
    let executor = I2cExecutor::new(config.i2c.resolve_tools());
    let response = executor.execute(command).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
