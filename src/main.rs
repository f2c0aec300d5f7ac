mod commands;

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todos", version, about = "Minimal Todo CRUD service")]
struct Cli {
    /// Path to the database file (default: .todos/todos.db in current dir)
    #[arg(long, global = true, env = "TODOS_DB")]
    db: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and schema
    Init,
    /// Run the HTTP API
    Serve {
        /// Address to bind to
        #[arg(long, env = "TODOS_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(short, long, env = "TODOS_PORT", default_value_t = 8888)]
        port: u16,
        /// Allow cross-origin requests from any origin
        #[arg(long, env = "TODOS_CORS")]
        cors: bool,
        /// Largest accepted request body in bytes (default: unlimited)
        #[arg(long, env = "TODOS_MAX_BODY_BYTES")]
        max_body_bytes: Option<usize>,
        /// Server URL advertised in /openapi.json (e.g. a tunnel URL)
        #[arg(long, env = "TODOS_PUBLIC_URL", default_value = todos::web::openapi::DEFAULT_PUBLIC_URL)]
        public_url: String,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so command output on stdout stays clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn default_db_path() -> Result<PathBuf, String> {
    let mut p =
        std::env::current_dir().map_err(|e| format!("cannot determine current directory: {e}"))?;
    p.push(".todos");
    p.push("todos.db");
    Ok(p)
}

fn run(cli: Cli) -> Result<(), String> {
    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&db_path),
        Commands::Serve {
            host,
            port,
            cors,
            max_body_bytes,
            public_url,
        } => commands::serve::run(
            &db_path,
            commands::serve::ServeOptions {
                host,
                port,
                cors,
                max_body_bytes,
                public_url,
            },
        ),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
