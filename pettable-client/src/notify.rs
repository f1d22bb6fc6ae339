//! User-facing notifications.
//!
//! The fetch layer reports outcomes the user must see (failed fetches,
//! missing lookup data, delete results) through a [`Notifier`]. Delivery is
//! fire-and-forget.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Delivers a message. Must not block.
    fn notify(&self, message: &str, severity: Severity);
}

/// Writes notifications to the tracing log at a matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Forwards notifications over an unbounded channel, e.g. to a UI task that
/// drains and displays them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let notification = Notification {
            message: message.to_string(),
            severity,
        };
        if self.tx.send(notification).is_err() {
            debug!("Notification dropped, receiver closed: {}", message);
        }
    }
}
