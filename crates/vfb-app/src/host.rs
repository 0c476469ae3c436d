//! Host notification bridge
//!
//! Forwards filter and display changes to an embedding host. Outside a host
//! every call returns immediately.

use std::sync::Arc;

use tracing::debug;
use vfb_core::{encode_for_host, DisplayMode, FilterConfiguration, HostMessage, HostNotifier, HostPayload};

#[derive(Debug, Clone)]
pub struct HostBridge {
    embedded: bool,
    notifier: Arc<dyn HostNotifier>,
}

impl HostBridge {
    pub fn new(embedded: bool, notifier: Arc<dyn HostNotifier>) -> Self {
        Self { embedded, notifier }
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn notify_filters(&self, filters: &FilterConfiguration) {
        if !self.embedded {
            return;
        }
        debug!("Notifying host of filter change");
        self.notifier
            .notify(&HostMessage::settings_update(encode_for_host(filters)));
    }

    pub fn notify_display(&self, display: DisplayMode) {
        if !self.embedded {
            return;
        }
        let new_display = display;
        debug!("Notifying host of display change: {}", new_display);
        self.notifier
            .notify(&HostMessage::settings_update(HostPayload::display(display)));
    }
}

/// Notifier for builds without a host endpoint; logs and drops.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl HostNotifier for NullNotifier {
    fn notify(&self, message: &HostMessage) {
        debug!("No host endpoint configured, dropping {}", message.topic);
    }
}
