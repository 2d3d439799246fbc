mod cli;

use hotwire_config::{ContentSnapshot, ReloadManager, ReloadOptions};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn init_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("invalid --log-level {directive:?}: {e}, using hotwire=info");
            EnvFilter::new("hotwire=info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hotwire=info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_snapshot(snapshot: &ContentSnapshot) {
    println!(
        "--- generation {} ({}) ---",
        snapshot.generation,
        snapshot.loaded_at.to_rfc3339()
    );
    println!("{}", String::from_utf8_lossy(snapshot.as_bytes()));
}

#[tokio::main]
async fn main() -> ExitCode {
    let (args, source) = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("hotwire v{} starting...", env!("CARGO_PKG_VERSION"));

    let options = ReloadOptions {
        debounce: args.debounce(),
        startup_reload: args.startup(),
    };
    let cancel = CancellationToken::new();
    let (initial, mut rx, handle) =
        match ReloadManager::start(Arc::new(source), options, cancel.clone()) {
            Ok(started) => started,
            Err(e) => {
                tracing::error!("failed to start: {e}");
                return ExitCode::FAILURE;
            }
        };
    print_snapshot(&initial);

    loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    tracing::warn!("failed to listen for ctrl-c: {e}");
                }
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    tracing::info!("reload channel closed");
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                print_snapshot(&snapshot);
            }
        }
    }

    cancel.cancel();
    handle.stopped().await;
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
