//! Terminal front end: error alerts and the status clock.
//!
//! Runs on its own task. Alerts arrive over the presenter channel, so the
//! session task never writes to the terminal directly.

use std::time::Duration;

use castline_common::{Notification, NotificationQueue};
use castline_session::SessionState;
use chrono::{DateTime, Local, TimeZone};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::info;

/// Short date, long time: `4/3/17, 9:41:07 AM +00:00`.
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%-m/%-d/%y, %-I:%M:%S %p %Z").to_string()
}

pub fn status_line<Tz>(now: &DateTime<Tz>, state: SessionState) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}  [{state}]", format_clock(now))
}

pub fn render_alert(alert: &Notification) -> String {
    format!("{}: {}  (Ok)", alert.title, alert.body)
}

/// Drive the front end until `stop` fires.
pub async fn run(
    mut alerts: mpsc::Receiver<Notification>,
    mut state: watch::Receiver<SessionState>,
    capacity: usize,
    show_clock: bool,
    mut stop: oneshot::Receiver<()>,
) {
    let mut queue = NotificationQueue::new(capacity);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut state_open = true;

    loop {
        tokio::select! {
            Some(alert) = alerts.recv() => {
                queue.push(alert);
                // A terminal can't hold a modal; show and dismiss in order.
                while let Some(alert) = queue.acknowledge() {
                    println!("{}", render_alert(&alert));
                }
            }
            changed = state.changed(), if state_open => match changed {
                Ok(()) => {
                    let current = *state.borrow();
                    info!(state = %current, "Session state");
                }
                Err(_) => state_open = false,
            },
            _ = ticker.tick(), if show_clock => {
                println!("{}", status_line(&Local::now(), *state.borrow()));
            }
            _ = &mut stop => break,
        }
    }
}
