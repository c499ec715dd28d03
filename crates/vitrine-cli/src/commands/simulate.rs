use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use vitrine_core::{AppConfig, Carousel, CarouselEvent, CarouselService, PointerCommand, SiteCatalog};

pub struct SimulateOptions {
    pub duration_ms: u64,
    pub hover_at_ms: Option<u64>,
    pub leave_at_ms: Option<u64>,
    pub row: usize,
    pub speed_ms: Option<i64>,
    pub json: bool,
}

#[derive(Serialize)]
struct Record<'a> {
    at_ms: u64,
    #[serde(flatten)]
    event: &'a CarouselEvent,
}

/// Pointer commands to send, ordered by their offset from the start
fn pointer_script(options: &SimulateOptions) -> Vec<(u64, PointerCommand)> {
    let row = options.row;
    let mut script: Vec<(u64, PointerCommand)> = options
        .hover_at_ms
        .map(|at| (at, PointerCommand::Enter { row }))
        .into_iter()
        .chain(options.leave_at_ms.map(|at| (at, PointerCommand::Leave { row })))
        .filter(|(at, _)| *at < options.duration_ms)
        .collect();
    script.sort_by_key(|(at, _)| *at);
    script
}

fn describe(at_ms: u64, event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::Advanced { row, frame } => format!(
            "{:>7}ms  row {}  {:<5}  offset {:>9.2} / {:.0}",
            at_ms,
            row,
            frame.direction.to_string(),
            frame.normalized_offset,
            frame.extent
        ),
        CarouselEvent::Paused { row } => format!("{:>7}ms  row {}  paused", at_ms, row),
        CarouselEvent::Resumed { row } => format!("{:>7}ms  row {}  resumed", at_ms, row),
        CarouselEvent::Stopped => format!("{:>7}ms  stopped", at_ms),
    }
}

pub async fn run(config: &AppConfig, catalog: &SiteCatalog, options: SimulateOptions) -> Result<()> {
    let mut marquee = config.marquee.clone();
    if options.speed_ms.is_some() {
        marquee.speed_ms = options.speed_ms;
    }

    let start = Instant::now();
    let carousel = Carousel::bidirectional(&catalog.thumbnails, &marquee, start);
    carousel.row(options.row)?;

    info!(
        "Simulating {} rows for {}ms (interval {:?})",
        carousel.len(),
        options.duration_ms,
        marquee.interval()
    );

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (pointer_tx, pointer_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let service = CarouselService::new(carousel).with_event_sender(event_tx);
    let handle = tokio::spawn(service.run(pointer_rx, shutdown_rx));

    // Scripted pointer movements
    let script = pointer_script(&options);
    tokio::spawn(async move {
        for (at, command) in script {
            sleep_until(start + Duration::from_millis(at)).await;
            debug!("Pointer {:?}", command);
            if pointer_tx.send(command).is_err() {
                break;
            }
        }
    });

    // Stop at the end of the run, or earlier on Ctrl+C
    let deadline = start + Duration::from_millis(options.duration_ms);
    tokio::spawn(async move {
        tokio::select! {
            _ = sleep_until(deadline) => {}
            _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
        }
        let _ = shutdown_tx.send(true);
    });

    while let Some(event) = event_rx.recv().await {
        let at_ms = start.elapsed().as_millis() as u64;
        if options.json {
            println!("{}", serde_json::to_string(&Record { at_ms, event: &event })?);
        } else {
            println!("{}", describe(at_ms, &event));
        }
        if event == CarouselEvent::Stopped {
            break;
        }
    }

    handle.await?;
    Ok(())
}
