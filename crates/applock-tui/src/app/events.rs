//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resized
    Resize,
    /// Periodic tick (idle check, countdowns, toasts)
    Tick,
}

/// Merges terminal input and ticks into one channel
pub struct EventHandler {
    /// Sender for events
    sender: mpsc::UnboundedSender<Event>,
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Tick rate for timers
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Spawn the tick generator and the terminal reader
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self) {
        let tick_tx = self.sender.clone();
        let tick_rate = self.tick_rate;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        let input_tx = self.sender.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            while let Some(event) = reader.next().await {
                let event = match event {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!("Terminal input error: {}", e);
                        break;
                    }
                };
                if input_tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[tokio::test]
    async fn test_sender_delivers_in_order() {
        let mut handler = EventHandler::new(Duration::from_millis(250));
        let tx = handler.sender.clone();

        tx.send(Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)))
            .unwrap();
        tx.send(Event::Tick).unwrap();

        assert!(matches!(handler.recv().await, Some(Event::Key(_))));
        assert!(matches!(handler.recv().await, Some(Event::Tick)));
        assert!(handler.receiver.try_recv().is_err());
    }
}
