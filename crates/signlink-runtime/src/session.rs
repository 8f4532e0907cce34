//! Camera session
//!
//! A `GestureSession` is the handle a camera view holds while it is open.
//! Detector callbacks push frames through `submit`/`try_submit`; the engine
//! runs on its own task and the UI reads `snapshot()`. The hold ticker is
//! armed only while a hold is in progress, so an idle session costs nothing
//! between frames.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use signlink_core::{Clock, FrameTime, HandFrame, SignLinkError, SignLinkResult};
use signlink_gesture::{
    ActionSink, EngineSnapshot, EngineStats, GestureAction, GestureEngine, GestureEvent, HoldUpdate,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::RuntimeConfig;

/// Session-relative clock driven by tokio's time source
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn start() -> Self {
        TokioClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> FrameTime {
        FrameTime::from_duration(self.origin.elapsed())
    }
}

/// Forwards actions to an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<GestureAction>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<GestureAction>) -> Self {
        ChannelSink { tx }
    }

    /// Sink plus the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GestureAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

impl ActionSink for ChannelSink {
    fn on_gesture(&mut self, action: &GestureAction) {
        if self.tx.send(action.clone()).is_err() {
            debug!(gesture = %action.gesture, "action receiver dropped");
        }
    }
}

/// What a stopped session hands back
#[derive(Debug)]
pub struct SessionReport<S> {
    pub stats: EngineStats,
    pub sink: S,
}

/// Handle to a running engine task
pub struct GestureSession<S> {
    frames: mpsc::Sender<Option<HandFrame>>,
    shutdown: Option<oneshot::Sender<()>>,
    snapshot: Arc<RwLock<EngineSnapshot>>,
    task: JoinHandle<SessionReport<S>>,
}

impl<S> GestureSession<S>
where
    S: ActionSink + Send + 'static,
{
    /// Build the engine and spawn its task. Must be called inside a tokio runtime.
    pub fn start(config: &RuntimeConfig, sink: S) -> SignLinkResult<Self> {
        let engine = GestureEngine::new(config.engine.clone(), config.table.clone(), sink)?;
        let (frames_tx, frames_rx) = mpsc::channel(config.frame_buffer.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let snapshot = Arc::new(RwLock::new(engine.snapshot()));

        info!(
            profile = ?config.profile,
            history = config.engine.history_size,
            debounce_ms = config.engine.base_debounce.as_millis() as u64,
            "gesture session started"
        );

        let task = tokio::spawn(run_engine(
            engine,
            frames_rx,
            shutdown_rx,
            snapshot.clone(),
            TokioClock::start(),
        ));

        Ok(GestureSession {
            frames: frames_tx,
            shutdown: Some(shutdown_tx),
            snapshot,
            task,
        })
    }

    /// Queue a detector result, waiting for buffer space
    pub async fn submit(&self, frame: Option<HandFrame>) -> SignLinkResult<()> {
        self.frames
            .send(frame)
            .await
            .map_err(|_| SignLinkError::SessionClosed)
    }

    /// Queue a detector result without waiting.
    /// Returns false when the buffer is full and the frame was dropped.
    pub fn try_submit(&self, frame: Option<HandFrame>) -> SignLinkResult<bool> {
        match self.frames.try_send(frame) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("frame buffer full, dropping frame");
                Ok(false)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SignLinkError::SessionClosed),
        }
    }

    /// Latest published engine state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot.read().clone()
    }

    /// Tear the session down. Frames still queued are discarded and any
    /// hold in progress is cancelled without firing.
    pub async fn stop(mut self) -> SignLinkResult<SessionReport<S>> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task.await.map_err(|e| {
            warn!(error = %e, "gesture session task failed");
            SignLinkError::SessionClosed
        })
    }
}

async fn run_engine<S: ActionSink>(
    mut engine: GestureEngine<S>,
    mut frames: mpsc::Receiver<Option<HandFrame>>,
    mut shutdown: oneshot::Receiver<()>,
    snapshot: Arc<RwLock<EngineSnapshot>>,
    clock: TokioClock,
) -> SessionReport<S> {
    let hold_tick = engine.config().hold_tick;
    let mut ticker: Option<Interval> = None;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            frame = frames.recv() => {
                let Some(frame) = frame else { break };
                let now = clock.now();
                engine.tick(now);
                match engine.observe(frame.as_ref(), now) {
                    Some(GestureEvent::Confirmed(c)) => {
                        debug!(gesture = %c.gesture, repeat = c.repeat, "gesture confirmed");
                    }
                    Some(GestureEvent::Released { previous }) => {
                        debug!(%previous, "gesture released");
                    }
                    None => {}
                }
            }

            _ = next_tick(&mut ticker) => {
                if let Some(HoldUpdate::Completed { gesture }) = engine.tick(clock.now()) {
                    debug!(%gesture, "hold completed");
                }
            }
        }

        sync_ticker(&engine, &mut ticker, hold_tick);
        *snapshot.write() = engine.snapshot();
    }

    drop(ticker);
    engine.reset();
    *snapshot.write() = engine.snapshot();

    let stats = engine.stats();
    info!(
        frames = stats.frames,
        confirmations = stats.confirmations,
        actions = stats.actions_dispatched,
        "gesture session stopped"
    );

    SessionReport {
        stats,
        sink: engine.into_sink(),
    }
}

/// Arm the ticker while a hold runs, drop it otherwise
fn sync_ticker<S: ActionSink>(engine: &GestureEngine<S>, ticker: &mut Option<Interval>, period: Duration) {
    match (engine.hold_active(), ticker.is_some()) {
        (true, false) => {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            *ticker = Some(interval);
        }
        (false, true) => *ticker = None,
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
