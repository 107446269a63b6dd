//! `storedash`: terminal host for the store provisioning dashboard.

mod confirm;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dash_logging::dash_debug;
use log::LevelFilter;
use storedash_client::{
    AutoConfirm, Confirmer, Dashboard, Poller, Transport, TransportConfig, DEFAULT_POLL_INTERVAL,
};

#[derive(Parser, Debug)]
#[command(name = "storedash", version, about = "Dashboard for a store provisioning service")]
struct Args {
    /// Provisioning service base URL.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Diagnostics level on stderr.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Answer yes to every confirmation prompt.
    #[arg(long)]
    yes: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Fetch and print the current store listing.
    List,
    /// Print one store as JSON.
    Show { id: String },
    /// Provision a new store.
    Create { name: String },
    /// Ask the service to re-check a store, then print the fresh listing.
    Refresh { id: String },
    /// Delete a store after confirmation.
    Delete { id: String },
    /// Re-render the listing on every poll until Ctrl-C.
    Watch {
        /// Seconds between reconciliations.
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
        interval_seconds: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dash_logging::initialize_terminal(args.log_level);

    let transport = Transport::new(TransportConfig::new(&args.base_url))
        .with_context(|| format!("configure transport for {}", args.base_url))?;
    let confirmer: Arc<dyn Confirmer> = if args.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(confirm::StdinConfirm)
    };
    let dashboard = Dashboard::with_confirmer(transport, confirmer);
    dash_debug!("using service at {}", args.base_url);

    match args.cmd {
        Cmd::List => {
            dashboard.list().await;
            print!("{}", render::table(&dashboard.view()));
        }
        Cmd::Show { id } => {
            let store = dashboard.fetch_store(&id).await?;
            println!("{}", serde_json::to_string_pretty(&store)?);
        }
        Cmd::Create { name } => {
            dashboard.create(&name).await;
            print!("{}", render::table(&dashboard.view()));
        }
        Cmd::Refresh { id } => {
            dashboard.refresh(&id).await;
            print!("{}", render::table(&dashboard.view()));
        }
        Cmd::Delete { id } => {
            dashboard.delete(&id).await;
            print!("{}", render::table(&dashboard.view()));
        }
        Cmd::Watch { interval_seconds } => {
            watch(dashboard, Duration::from_secs(interval_seconds)).await;
        }
    }
    Ok(())
}

/// Runs a poller and redraws on every published view. Ctrl-C detaches the
/// poller; a reconciliation already in flight finishes quietly.
async fn watch(dashboard: Dashboard, interval: Duration) {
    let mut views = dashboard.subscribe();
    let poller = Poller::start(dashboard.clone(), interval);
    render::redraw(&dashboard.view());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                render::redraw(&view);
            }
        }
    }
    poller.stop();
}
