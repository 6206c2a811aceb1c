use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::{Duration, Instant},
};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Terminal events
#[derive(Clone, Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Periodic tick driving clocks and the leaderboard
    Tick,
}

/// Polls the terminal on a background thread. The thread is stopped and
/// joined when the handler is dropped.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
    handler: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let handler = {
            let stop = stop.clone();
            thread::spawn(move || {
                let mut last_tick = Instant::now();
                while !stop.load(Ordering::Relaxed) {
                    let timeout = tick_rate
                        .checked_sub(last_tick.elapsed())
                        .unwrap_or(Duration::ZERO);

                    let forwarded = match event::poll(timeout) {
                        Ok(true) => match event::read() {
                            Ok(CrosstermEvent::Key(e)) if e.kind == event::KeyEventKind::Press => {
                                sender.send(Event::Key(e))
                            }
                            Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                            Ok(_) => Ok(()),
                            Err(_) => break,
                        },
                        Ok(false) => Ok(()),
                        Err(_) => break,
                    };
                    if forwarded.is_err() {
                        break;
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if sender.send(Event::Tick).is_err() {
                            break;
                        }
                        last_tick = Instant::now();
                    }
                }
            })
        };

        Self {
            receiver,
            stop,
            handler: Some(handler),
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handler) = self.handler.take() {
            let _ = handler.join();
        }
    }
}
