//! Single-slot hand-off queue between two tasks.
//!
//! A mailbox holds at most one undelivered message. `send` waits while the
//! slot is occupied, `recv` waits while it is empty. That is the whole
//! backpressure story: a sender can never get more than one move ahead of
//! the reader on the other side.
//!
//! Both operations are cancel-safe. Dropping a pending `send` leaves the
//! mailbox unchanged; dropping a pending `recv` never loses a message.

use tokio::sync::{mpsc, Mutex};

pub struct Mailbox<T = String> {
    tx: mpsc::Sender<T>,
    // One logical consumer at a time; a second one queues behind the lock.
    rx: Mutex<mpsc::Receiver<T>>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Deliver a message, waiting until the previous one has been taken.
    pub async fn send(&self, message: T) {
        // The receiver lives in `self`, so the channel cannot be closed here.
        let _ = self.tx.send(message).await;
    }

    /// Deliver without waiting. Hands the message back if the slot is full.
    pub fn try_send(&self, message: T) -> Result<(), T> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(m) | mpsc::error::TrySendError::Closed(m) => m,
        })
    }

    /// Take the next message, waiting until one arrives.
    pub async fn recv(&self) -> T {
        let mut rx = self.rx.lock().await;
        match rx.recv().await {
            Some(message) => message,
            // Unreachable while `self.tx` exists; wait like an empty slot would.
            None => std::future::pending().await,
        }
    }

    /// True if a message is sitting in the slot undelivered.
    pub fn is_occupied(&self) -> bool {
        self.tx.capacity() == 0
    }
}
