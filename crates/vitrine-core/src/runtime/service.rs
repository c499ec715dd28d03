use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::carousel::Carousel;
use crate::engine::{EngineState, MarqueeFrame};

/// Pointer transitions addressed to one carousel row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCommand {
    Enter { row: usize },
    Leave { row: usize },
}

/// Events emitted by the service so a renderer can redraw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum CarouselEvent {
    /// A row applied one or more ticks
    Advanced { row: usize, frame: MarqueeFrame },
    /// A row stopped scrolling because the pointer is over it
    Paused { row: usize },
    /// A row started scrolling again
    Resumed { row: usize },
    /// The carousel was torn down; nothing follows
    Stopped,
}

/// Drives a [`Carousel`] on the tokio timer.
///
/// Everything runs on the one task executing [`run`](Self::run): clock
/// deadlines, pointer commands and shutdown are handled one at a time, so
/// engine state is never touched concurrently.
pub struct CarouselService {
    carousel: Carousel,
    states: Vec<EngineState>,
    event_tx: Option<mpsc::UnboundedSender<CarouselEvent>>,
}

impl CarouselService {
    pub fn new(carousel: Carousel) -> Self {
        let states = carousel.frames().iter().map(|f| f.state).collect();
        Self {
            carousel,
            states,
            event_tx: None,
        }
    }

    /// Set the event sender for renderer notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<CarouselEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn send_event(&self, event: CarouselEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send carousel event: receiver dropped");
            }
        }
    }

    /// Run until the shutdown flag is set or its sender is dropped.
    ///
    /// The carousel is destroyed before returning, so no tick can fire once
    /// the future completes.
    pub async fn run(
        mut self,
        mut pointer_rx: mpsc::UnboundedReceiver<PointerCommand>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("Carousel service started: {} rows", self.carousel.len());

        loop {
            let deadline = self.carousel.next_deadline();

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Carousel service received shutdown signal");
                        break;
                    }
                }

                Some(command) = pointer_rx.recv() => {
                    self.handle_pointer(command, Instant::now());
                }

                _ = wait_for(deadline) => {
                    self.advance(Instant::now());
                }
            }
        }

        self.carousel.destroy();
        self.send_event(CarouselEvent::Stopped);
        info!("Carousel service stopped");
    }

    fn handle_pointer(&mut self, command: PointerCommand, now: Instant) {
        // Ticks due at this instant land before the pointer transition
        self.advance(now);

        let result = match command {
            PointerCommand::Enter { row } => self.carousel.pointer_enter(row, now),
            PointerCommand::Leave { row } => self.carousel.pointer_leave(row, now),
        };
        if let Err(e) = result {
            warn!("Ignoring pointer command {:?}: {}", command, e);
            return;
        }
        self.publish_transitions();
    }

    fn advance(&mut self, now: Instant) {
        let ticks = self.carousel.advance(now);
        self.publish_transitions();

        for (row, count) in ticks.into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            if let Ok(row_ref) = self.carousel.row(row) {
                let frame = row_ref.engine.frame();
                debug!(
                    "Row {} advanced {} tick(s) to {:.2}",
                    row, count, frame.normalized_offset
                );
                self.send_event(CarouselEvent::Advanced { row, frame });
            }
        }
    }

    /// Emit Paused/Resumed for rows whose state changed since last seen
    fn publish_transitions(&mut self) {
        let current: Vec<EngineState> = self.carousel.frames().iter().map(|f| f.state).collect();

        for (row, (before, after)) in self.states.iter().zip(&current).enumerate() {
            match (before, after) {
                (EngineState::Running, EngineState::Paused) => {
                    self.send_event(CarouselEvent::Paused { row })
                }
                (EngineState::Paused, EngineState::Running) => {
                    self.send_event(CarouselEvent::Resumed { row })
                }
                _ => {}
            }
        }

        self.states = current;
    }
}

/// Sleep until `deadline`, or forever when nothing is scheduled
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
