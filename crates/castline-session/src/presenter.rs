//! Presentation seam for user-facing errors.

use castline_common::Notification;
use tokio::sync::mpsc;
use tracing::warn;

/// Receives errors that the user should see.
pub trait Presenter: Send {
    fn notify_error(&self, message: &str);
}

/// Forwards errors as alerts to the task that owns the UI.
///
/// The controller runs on the session task; the UI drains the receiver on
/// its own context, so nothing UI-side is touched from here.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::Sender<Notification>,
}

impl ChannelPresenter {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl Presenter for ChannelPresenter {
    fn notify_error(&self, message: &str) {
        if let Err(e) = self.tx.try_send(Notification::error_alert(message)) {
            warn!(error = %e, alert = message, "Dropped error alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castline_common::NotificationLevel;

    #[tokio::test]
    async fn channel_presenter_delivers_alerts() {
        let (presenter, mut rx) = ChannelPresenter::new(4);
        presenter.notify_error("connect failed");

        let alert = rx.recv().await.unwrap();
        assert_eq!(alert.level, NotificationLevel::Error);
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.body, "connect failed");
    }

    #[tokio::test]
    async fn channel_presenter_drops_when_full() {
        let (presenter, mut rx) = ChannelPresenter::new(1);
        presenter.notify_error("first");
        presenter.notify_error("second");

        assert_eq!(rx.recv().await.unwrap().body, "first");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_presenter_survives_closed_receiver() {
        let (presenter, rx) = ChannelPresenter::new(1);
        drop(rx);
        presenter.notify_error("nobody listening");
    }
}
