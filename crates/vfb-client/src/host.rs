//! Host message delivery over HTTP

use reqwest::Client;
use url::Url;
use vfb_core::prelude::*;
use vfb_core::{HostMessage, HostNotifier};

/// True when both URLs share scheme, host and port.
pub fn same_origin(endpoint: &str, trusted_origin: &str) -> bool {
    match (Url::parse(endpoint), Url::parse(trusted_origin)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}

/// POSTs host messages to the configured endpoint as JSON.
///
/// Messages are only sent when the endpoint's origin equals the trusted
/// origin; anything else is logged and dropped.
#[derive(Debug, Clone)]
pub struct PostMessageNotifier {
    http: Client,
    endpoint: String,
    trusted_origin: String,
}

impl PostMessageNotifier {
    pub fn new(endpoint: impl Into<String>, trusted_origin: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            trusted_origin: trusted_origin.into(),
        }
    }

    pub fn is_trusted(&self) -> bool {
        same_origin(&self.endpoint, &self.trusted_origin)
    }
}

impl HostNotifier for PostMessageNotifier {
    fn notify(&self, message: &HostMessage) {
        if !self.is_trusted() {
            warn!(
                "Host endpoint {} is not on trusted origin {}, message dropped",
                self.endpoint, self.trusted_origin
            );
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available, host message dropped");
            return;
        };

        let request = self.http.post(&self.endpoint).json(message);
        let endpoint = self.endpoint.clone();
        let topic = message.topic.clone();
        runtime.spawn(async move {
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("Host message {} delivered", topic);
                }
                Ok(resp) => {
                    warn!("Host {} rejected message: {}", endpoint, resp.status());
                }
                Err(e) => {
                    warn!("Failed to deliver host message to {}: {}", endpoint, e);
                }
            }
        });
    }
}
