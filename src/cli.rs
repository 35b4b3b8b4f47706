//! CLI entry points for the `x-ui` binary.

use std::io;
use std::time::Duration;

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use xui_config::{Configuration, LogLevel};
use xui_traffic::{HttpGateway, Reconciler, Scheduler};

use crate::startup;

/// Arguments for `x-ui run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Proxy stats API base URL (overrides XUI_PROXY_API).
    #[arg(long)]
    pub proxy_api: Option<String>,

    /// Traffic reconciliation interval in seconds (overrides XUI_TRAFFIC_INTERVAL).
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

impl RunArgs {
    /// Layer the flags over the resolved configuration.
    pub fn apply(&self, mut config: Configuration) -> Configuration {
        if let Some(url) = &self.proxy_api {
            config = config.with_proxy_api(url.clone());
        }
        if let Some(secs) = self.interval {
            config = config.with_traffic_interval(Duration::from_secs(secs));
        }
        config
    }
}

/// Bootstrap, then reconcile traffic until SIGINT/SIGTERM.
pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.apply(Configuration::resolve());
    init_tracing(config.log_level());

    info!(
        version = config.version(),
        debug = config.is_debug(),
        base_dir = %config.base_dir().display(),
        "x-ui starting"
    );

    let store = startup::bootstrap(&config).await.inspect_err(|e| {
        error!(kind = e.kind(), error = %e, "startup failed");
    })?;

    let gateway = HttpGateway::new(config.proxy_api())?;
    let scheduler = Scheduler::new(
        gateway,
        Reconciler::new(store.clone()),
        config.traffic_interval(),
    );

    let shutdown = CancellationToken::new();
    let handle = scheduler.spawn(shutdown.clone());

    shutdown_signal_handler().await;
    info!("shutdown signal received");
    shutdown.cancel();

    if let Err(e) = handle.await {
        warn!(error = %e, "traffic scheduler task failed");
    }
    store.close().await;

    info!("x-ui stopped");
    Ok(())
}

/// Bootstrap only, then exit.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::resolve();
    init_tracing(config.log_level());

    let store = startup::bootstrap(&config).await?;
    store.close().await;

    println!("initialized {}", config.install_dir().display());
    Ok(())
}

/// Print the resolved configuration.
pub fn paths() -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::resolve();
    print!("{}", describe(&config));
    Ok(())
}

fn describe(config: &Configuration) -> String {
    format!(
        "name:             {}\n\
         version:          {}\n\
         log level:        {}\n\
         debug:            {}\n\
         install dir:      {}\n\
         database:         {}\n\
         proxy config:     {}\n\
         logs:             {}\n\
         proxy api:        {}\n\
         traffic interval: {}s\n",
        config.name(),
        config.version(),
        config.log_level(),
        config.is_debug(),
        config.install_dir().display(),
        config.db_path().display(),
        config.config_path().display(),
        config.logs_dir().display(),
        config.proxy_api(),
        config.traffic_interval().as_secs(),
    )
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// `RUST_LOG` wins over the resolved level when set.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Configuration {
        Configuration::from_lookup(|key| match key {
            "XUI_BASE_DIR" => Some("/srv".to_string()),
            _ => None,
        })
    }

    #[test]
    fn flags_override_environment() {
        let args = RunArgs {
            proxy_api: Some("http://10.0.0.2:9000".to_string()),
            interval: Some(30),
        };
        let config = args.apply(config());
        assert_eq!(config.proxy_api(), "http://10.0.0.2:9000");
        assert_eq!(config.traffic_interval(), Duration::from_secs(30));
    }

    #[test]
    fn absent_flags_keep_resolved_values() {
        let config = RunArgs::default().apply(config());
        assert_eq!(config.proxy_api(), xui_core::defaults::DEFAULT_PROXY_API);
        assert_eq!(config.traffic_interval(), Duration::from_secs(10));
    }

    #[test]
    fn describe_lists_derived_paths() {
        let text = describe(&config());
        assert!(text.contains("/srv/x-ui/x-ui.db"));
        assert!(text.contains("/srv/x-ui/config.json"));
        assert!(text.contains("/srv/x-ui/logs"));
        assert!(text.contains("log level:        info"));
    }
}
