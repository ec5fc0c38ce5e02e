//! Runs the taskgate HTTP service or mints bearer tokens for it.
//!
//! Usage:
//!
//! ```text
//! taskgate serve [--bind ADDR] [--database-url URL] [--migrate]
//!                [--log FILTER] [--log-format compact|json]
//! taskgate issue-token --subject NAME --role USER|ADMIN [--ttl-secs N]
//! ```
//!
//! Both commands read `TASKGATE_JWT_SECRET`; see [`taskgate::config`] for
//! every recognised variable.

use clap::{Args, Parser, Subcommand};
use mockable::DefaultClock;
use secrecy::ExposeSecret;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use taskgate::api::{AppState, Backends, router};
use taskgate::auth::adapters::{JwtTokenCodec, TokenIssueError};
use taskgate::auth::domain::{AuthDomainError, Identity, ParseRoleError, Role, Subject};
use taskgate::config::{ConfigError, ConfigOverrides, LogFormat, ServerConfig, StorageConfig};
use taskgate::task::adapters::postgres::{
    BlockingError, PostgresCommentRepository, PostgresProjectRepository, PostgresTaskRepository,
    apply_schema, connect,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "taskgate",
    version,
    about = "Task tracking service with bearer-token access control"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API until interrupted.
    Serve(ServeArgs),
    /// Print a signed token for a subject.
    IssueToken(IssueTokenArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Listen address (also: `TASKGATE_BIND`).
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// `PostgreSQL` URL; in-memory storage when absent (also: `TASKGATE_DATABASE_URL`).
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,

    /// Create missing tables before serving.
    #[arg(long)]
    migrate: bool,

    /// Log filter directive (also: `TASKGATE_LOG`, `RUST_LOG`).
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Log output format (also: `TASKGATE_LOG_FORMAT`).
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Args)]
struct IssueTokenArgs {
    /// Subject recorded as owner or author.
    #[arg(long)]
    subject: String,

    /// Role claim.
    #[arg(long, value_parser = parse_role)]
    role: Role,

    /// Lifetime in seconds; defaults to `TASKGATE_TOKEN_TTL_SECS`.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    ttl_secs: Option<i64>,
}

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to open database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to apply schema: {0}")]
    Schema(#[from] BlockingError),
    #[error("invalid subject: {0}")]
    Subject(#[from] AuthDomainError),
    #[error(transparent)]
    Token(#[from] TokenIssueError),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_role(value: &str) -> Result<Role, ParseRoleError> {
    Role::try_from(value)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await?,
        Command::IssueToken(args) => issue_token(args)?,
    }
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let config = ServerConfig::from_env(ConfigOverrides {
        bind: args.bind,
        database_url: args.database_url,
        log_filter: args.log,
        log_format: args.log_format,
    })?;
    init_tracing(&config)?;

    let backends = open_backends(config.storage(), args.migrate).await?;
    let verifier = Arc::new(JwtTokenCodec::new(config.jwt()));
    let app = router(AppState::new(verifier, backends));

    let listener = tokio::net::TcpListener::bind(config.bind()).await?;
    info!(addr = %listener.local_addr()?, issuer = config.jwt().issuer(), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn init_tracing(config: &ServerConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(config.log_filter())?;
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format() {
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
    Ok(())
}

async fn open_backends(storage: &StorageConfig, migrate: bool) -> Result<Backends, CliError> {
    match storage {
        StorageConfig::InMemory => {
            warn!("no database configured, data is kept in memory only");
            Ok(Backends::in_memory())
        }
        StorageConfig::Postgres { url, pool_size } => {
            let pool = connect(url.expose_secret(), *pool_size)?;
            if migrate {
                apply_schema(&pool).await?;
                info!("schema applied");
            }
            info!(pool_size, "connected to postgres");
            Ok(Backends {
                tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
                projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pool)),
            })
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn issue_token(args: IssueTokenArgs) -> Result<(), CliError> {
    let config = ServerConfig::from_env(ConfigOverrides::default())?;
    let codec = JwtTokenCodec::new(config.jwt());
    let identity = Identity::new(Subject::new(args.subject)?, args.role);
    let token = args.ttl_secs.map_or_else(
        || codec.issue(&identity, &DefaultClock),
        |secs| codec.issue_for_secs(&identity, secs, &DefaultClock),
    )?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{token}")?;
    Ok(())
}
