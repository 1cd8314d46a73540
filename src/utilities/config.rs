use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use tokio::fs;
use tracing::Level;

use crate::utilities::errors::AppError;

/// HTTP shim that reports and sets Deployment replica counts
#[derive(Parser, Clone, Debug)]
#[command(name = "replica-shim", version, about)]
pub struct Cli {
    /// Absolute path to the kubeconfig file
    #[arg(long, default_value = "./config")]
    pub kubeconfig: PathBuf,

    /// Address and port to bind the HTTP server to
    #[arg(long, default_value = ":8000")]
    pub address: String,

    /// Namespace listed at startup to verify the credentials work
    #[arg(long, env = "STARTUP_NAMESPACE", default_value = "default")]
    pub startup_namespace: String,

    /// Reject scale bodies that are not a non-negative integer instead of scaling to zero
    #[arg(long)]
    pub strict_replicas: bool,

    /// Send the scale resourceVersion back on update so concurrent writes conflict
    #[arg(long)]
    pub optimistic_concurrency: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,

    // KUBERNETES
    pub k8s_in_cluster: bool,
    pub k8s_config_path: PathBuf,
    pub startup_namespace: String,

    // SCALING
    pub strict_replicas: bool,
    pub optimistic_concurrency: bool,

    pub tracing_level: Level,
}

impl Config {
    pub async fn init(cli: Cli) -> Result<Self, AppError> {
        let server_address = normalize_address(&cli.address)?;

        let k8s_in_cluster = get_config_value("INCLUSTER", Some("INCLUSTER"), None, false).await?;

        let strict_replicas = cli.strict_replicas
            || get_config_value("STRICT_REPLICAS", Some("STRICT_REPLICAS"), None, false).await?;
        let optimistic_concurrency = cli.optimistic_concurrency
            || get_config_value(
                "OPTIMISTIC_CONCURRENCY",
                Some("OPTIMISTIC_CONCURRENCY"),
                None,
                false,
            )
            .await?;

        let tracing_level =
            get_config_value("TRACING_LEVEL", Some("TRACING_LEVEL"), None, Level::INFO).await?;

        Ok(Config {
            server_address,
            k8s_in_cluster,
            k8s_config_path: cli.kubeconfig,
            startup_namespace: cli.startup_namespace,
            strict_replicas,
            optimistic_concurrency,
            tracing_level,
        })
    }
}

/// Turns a listen address into something `TcpListener::bind` accepts.
/// A bare `:port` binds every interface.
pub fn normalize_address(address: &str) -> Result<String, AppError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::InvalidAddress("(empty)".to_string()));
    }

    match address.strip_prefix(':') {
        Some(port) if port.parse::<u16>().is_ok() => Ok(format!("0.0.0.0:{port}")),
        Some(_) => Err(AppError::InvalidAddress(address.to_string())),
        None => Ok(address.to_string()),
    }
}

/// Try to resolve config value from Docker secrets, env var, or a fallback file.
/// - `secret_name` → filename inside `/run/secrets/`
/// - `env_name` → optional environment variable key
/// - `fallback_path` → fallback file path (checked if exists)
///
/// Values that fail to parse are skipped and the next source is tried.
pub async fn get_config_value<T>(
    secret_name: &str,
    env_name: Option<&str>,
    fallback_path: Option<&Path>,
    fallback: T,
) -> Result<T, AppError>
where
    T: FromStr,
{
    // 1. Docker secrets
    let docker_secret = Path::new("/run/secrets").join(secret_name);
    if let Some(parsed) = read_value_file(&docker_secret).await? {
        return Ok(parsed);
    }

    // 2. Env var
    if let Some(env_key) = env_name
        && let Ok(val) = std::env::var(env_key)
        && let Ok(parsed) = T::from_str(val.trim())
    {
        return Ok(parsed);
    }

    // 3. Fallback file path
    if let Some(path) = fallback_path
        && let Some(parsed) = read_value_file(path).await?
    {
        return Ok(parsed);
    }

    // 4. Final fallback
    Ok(fallback)
}

async fn read_value_file<T: FromStr>(path: &Path) -> Result<Option<T>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).await.map_err(|e| {
        AppError::FileReadError(format!("Failed to read config file at {}, {e}", path.display()))
    })?;

    Ok(T::from_str(content.trim()).ok())
}
