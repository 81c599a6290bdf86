use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use lumen_core::{FrameClock, FrameTick};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    /// One display refresh
    Frame(FrameTick),
}

impl AppEvent {
    /// Map a raw terminal event; events the host ignores map to `None`
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            // Only key presses; crossterm reports releases on some platforms
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::FocusGained => Some(AppEvent::FocusGained),
            Event::FocusLost => Some(AppEvent::FocusLost),
            _ => None,
        }
    }
}

/// Merges terminal input and frame ticks into one stream
///
/// Input is read on a blocking thread; frames come from a [`FrameClock`]
/// task. Both stop when the handler is shut down.
pub struct EventHandler {
    input_rx: mpsc::UnboundedReceiver<AppEvent>,
    frame_rx: mpsc::UnboundedReceiver<FrameTick>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventHandler {
    /// Start reading the terminal. `tick_rate_ms` bounds how long the reader
    /// blocks before checking for shutdown.
    pub fn start(tick_rate_ms: u64, fps: u32) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let mut handler = Self::with_input(input_rx, fps);
        let reader = spawn_input_reader(
            Duration::from_millis(tick_rate_ms.max(1)),
            input_tx,
            handler.shutdown_tx.subscribe(),
        );
        handler.tasks.push(reader);
        handler
    }

    /// Frame clock only; input arrives through `input_rx`
    fn with_input(input_rx: mpsc::UnboundedReceiver<AppEvent>, fps: u32) -> Self {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let clock = FrameClock::new(fps, frame_tx).spawn(shutdown_rx);

        Self {
            input_rx,
            frame_rx,
            shutdown_tx,
            tasks: vec![clock],
        }
    }

    /// Next event, input first. `None` once every producer has stopped.
    pub async fn next(&mut self) -> Option<AppEvent> {
        tokio::select! {
            biased;
            Some(event) = self.input_rx.recv() => Some(event),
            Some(tick) = self.frame_rx.recv() => Some(AppEvent::Frame(tick)),
            else => None,
        }
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("Event producers already stopped");
        }
        for task in self.tasks {
            if let Err(e) = task.await {
                error!("Event task failed: {}", e);
            }
        }
    }
}

fn spawn_input_reader(
    poll: Duration,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !*shutdown.borrow() {
            match read_event(poll) {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Terminal input failed: {}", e);
                    break;
                }
            }
        }
        debug!("Input reader stopped");
    })
}

fn read_event(poll: Duration) -> std::io::Result<Option<AppEvent>> {
    if !event::poll(poll)? {
        return Ok(None);
    }
    Ok(AppEvent::from_terminal(event::read()?))
}
