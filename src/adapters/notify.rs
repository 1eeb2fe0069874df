//! Log-backed notifier
//!
//! Default NotifierPort implementation for hosts without a notification
//! surface; notices land in the log stream instead.

use crate::ports::notify::NotifierPort;

/// Notifier writing notices to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotifierPort for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!("notice: {}", message);
    }
}
