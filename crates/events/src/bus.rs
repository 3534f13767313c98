//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the seam between the lifecycle engine and whatever actually
//! delivers events (audit log, notification fan-out, webhooks). It is
//! intentionally lightweight:
//!
//! - **Transport-agnostic**: in-memory channels, Redis, a broker - anything.
//! - **At-least-once**: events may be re-delivered; consumers must be
//!   idempotent.
//! - **No persistence**: the bus distributes, it does not store. The caller
//!   persists events before publishing them, so re-publication is safe.
//!
//! The engine itself never publishes: factories construct events and hand
//! ownership to the caller, which decides when (and whether) to dispatch.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics). Designed for single-threaded consumption;
/// hand out one subscription per consumer thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (bus full, transport error); failures surface to the
/// caller, which may retry - safe, because events are persisted before they
/// are published. Implementations must be `Send + Sync` so concurrent
/// request handlers can publish without coordination.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
