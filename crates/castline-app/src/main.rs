mod cli;
mod presentation;
mod setup;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use castline_common::{CastlineError, StreamId};
use castline_config::{CastlineConfig, LogLevel};
use castline_session::{
    event_channel, ChannelPresenter, LoopbackSession, SessionController, SessionDriver,
    SessionState, SurfaceCapture,
};
use tokio::sync::{oneshot, watch};
use tracing_subscriber::EnvFilter;

/// How long to wait for the session to confirm a disconnect.
const DISCONNECT_GRACE: Duration = Duration::from_secs(5);

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Only the current directory is searched. Existing variables win.
/// Must run before any other thread exists.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches('"').trim_matches('\'')))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn init_logging(cli_level: Option<&str>, config_level: LogLevel) {
    let fallback = format!("castline={}", config_level.as_directive());
    let directive = cli_level
        .map(|level| format!("castline={level}"))
        .unwrap_or(fallback);

    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::new("castline=info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    // Environment changes must happen before the runtime spawns workers.
    load_dotenv();
    let args = cli::parse();

    // Load config before logging so its level can apply; report the
    // outcome once the subscriber is up.
    let loaded = castline_config::load_config(args.config.as_deref().map(Path::new));
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("castline v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        CastlineConfig::default()
    });

    if args.print_config {
        println!("{}", castline_config::config_to_json(&config));
        return;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args, config)) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

async fn run(args: cli::Args, mut config: CastlineConfig) -> castline_common::Result<()> {
    config.subscriber.subscribe_to_self |= args.subscribe_to_self;
    if let Err(e) = castline_config::require_credentials(&config) {
        tracing::warn!("{e}; the session will refuse to connect");
    }

    // Session layer: loopback with simulated participants.
    let (event_tx, event_rx) = event_channel();
    let session = LoopbackSession::new(event_tx)
        .with_remote_streams((0..args.remote_streams).map(|_| StreamId::generate()));

    let capacity = config.ui.alert_capacity as usize;
    let (presenter, alerts) = ChannelPresenter::new(capacity);
    let capture = SurfaceCapture::new(args.surface.clone())
        .with_video_type(config.publisher.video_type);
    let controller = SessionController::new(
        setup::credentials(&config),
        session,
        Arc::new(capture),
        Box::new(presenter),
    )
    .with_publisher_settings(setup::publisher_settings(
        &config,
        setup::default_publisher_name(),
    ))
    .with_subscribe_to_self(config.subscriber.subscribe_to_self);

    let mut state = controller.watch_state();
    let (driver, handle) = SessionDriver::new(controller, event_rx);
    let driver_task = tokio::spawn(driver.run());

    let (stop_ui, stop_ui_rx) = oneshot::channel();
    let ui_task = tokio::spawn(presentation::run(
        alerts,
        state.clone(),
        capacity,
        config.ui.show_clock,
        stop_ui_rx,
    ));

    // Errors are already on their way to the presentation task.
    if let Err(e) = handle.connect().await {
        tracing::debug!("connect rejected: {e}");
    }

    let stopped = wait_for_exit(&mut state, args.run_for).await;
    if !stopped && handle.disconnect().await.is_ok() {
        let settled = tokio::time::timeout(
            DISCONNECT_GRACE,
            state.wait_for(|s| matches!(s, SessionState::Disconnected | SessionState::Errored)),
        )
        .await;
        if settled.is_err() {
            tracing::warn!("Session did not confirm disconnect in time");
        }
    }

    handle.shutdown().await;
    let controller = driver_task
        .await
        .map_err(|e| CastlineError::Other(format!("session task failed: {e}")))?;

    let _ = stop_ui.send(());
    let _ = ui_task.await;

    match controller.state() {
        SessionState::Errored => Err(CastlineError::Session(
            "session ended with an error".into(),
        )),
        state => {
            tracing::info!(%state, "Session closed");
            Ok(())
        }
    }
}

/// Wait for Ctrl-C, the run timer, or a terminal session state.
/// Returns `true` when the session already ended on its own.
async fn wait_for_exit(state: &mut watch::Receiver<SessionState>, run_for: u64) -> bool {
    let timer = async {
        if run_for == 0 {
            std::future::pending::<()>().await;
        } else {
            tokio::time::sleep(Duration::from_secs(run_for)).await;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, leaving session");
            false
        }
        _ = timer => false,
        ended = state.wait_for(|s| matches!(s, SessionState::Disconnected | SessionState::Errored)) => {
            ended.is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_lines_are_parsed() {
        let contents = "# credentials
CASTLINE_TOKEN=\"abc\"

CASTLINE_SESSION_ID = room-1
not a pair
=orphan
";
        assert_eq!(
            parse_dotenv(contents),
            vec![("CASTLINE_TOKEN", "abc"), ("CASTLINE_SESSION_ID", "room-1")]
        );
    }

    #[test]
    fn single_quotes_are_stripped() {
        assert_eq!(parse_dotenv("KEY='v a l'"), vec![("KEY", "v a l")]);
    }
}
