use anyhow::Result;
use clap::Parser;
use drink_kiosk::{
    catalog::load_catalog,
    cli::Args,
    config::Config,
    events::{KioskEvent, create_event_channel},
    kiosk::Kiosk,
    monitor::ConnectionMonitor,
    monitoring::setup_metrics,
    state::shared_state,
    tracing_setup::setup_tracing,
    transport,
    ui::{UIController, UIOptions},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(&args.log_level, args.json_logs)?;

    info!("starting drink kiosk v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_args(&args)?);

    if config.metrics.enabled {
        setup_metrics(config.metrics.port).await?;
        info!("metrics server started on port {}", config.metrics.port);
    }

    let (event_tx, event_rx) = create_event_channel();
    let state = shared_state();

    let _ = event_tx.send(KioskEvent::Starting).await;

    // A failed load leaves the kiosk interactive but degraded: the menu is
    // empty, so nothing can be selected or ordered.
    let catalog = match load_catalog(&config.catalog.path).await {
        Ok(items) => {
            let _ = event_tx
                .send(KioskEvent::CatalogLoaded { count: items.len() })
                .await;
            Arc::new(items)
        }
        Err(err) => {
            warn!("catalog unavailable: {err}");
            let _ = event_tx
                .send(KioskEvent::CatalogFailed {
                    reason: err.to_string(),
                })
                .await;
            Arc::new(Vec::new())
        }
    };

    let (mqtt, eventloop) = transport::connect(&config)?;
    let _ = event_tx
        .send(KioskEvent::Connecting {
            url: config.broker.url.to_string(),
        })
        .await;

    let mut ui = UIController::new(
        event_rx,
        catalog.clone(),
        UIOptions {
            colored: config.ui.colored,
            quiet: config.ui.quiet,
        },
    );
    let ui_task = tokio::spawn(async move { ui.run().await });

    let monitor = ConnectionMonitor::new(config.clone(), state.clone(), event_tx.clone(), eventloop);
    let monitor_task = tokio::spawn(monitor.run());

    let kiosk = Kiosk::new(config, catalog, state, Arc::new(mqtt), event_tx.clone());

    let result = tokio::select! {
        res = kiosk.run_input_loop() => res,
        res = monitor_task => match res {
            Ok(inner) => {
                if let Err(ref err) = inner {
                    error!("connection monitor failed: {err}");
                }
                inner
            }
            Err(join_err) => Err(join_err.into()),
        },
    };

    let _ = event_tx.send(KioskEvent::Stopping).await;
    drop(event_tx);
    let _ = ui_task.await;

    info!("kiosk stopped");
    result
}
