//! Messages pushed to an embedding host

use serde::Serialize;

use crate::codec::HostPayload;

/// Topic of the settings-update message understood by the host.
pub const UPDATE_SETTINGS_TOPIC: &str = "/clb/community-app/settings/update";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostMessage {
    pub topic: String,
    pub data: HostPayload,
}

impl HostMessage {
    pub fn settings_update(data: HostPayload) -> Self {
        Self {
            topic: UPDATE_SETTINGS_TOPIC.to_string(),
            data,
        }
    }
}

/// Delivers host messages.
///
/// Delivery is fire-and-forget: implementations log failures and never report
/// them to the caller.
pub trait HostNotifier: Send + Sync + std::fmt::Debug {
    fn notify(&self, message: &HostMessage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_for_host;
    use crate::filters::{FilterConfiguration, FilterKey};

    #[test]
    fn test_settings_update_shape() {
        let filters = FilterConfiguration::new().with(FilterKey::Species, ["Mus musculus"]);
        let message = HostMessage::settings_update(encode_for_host(&filters));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["topic"], UPDATE_SETTINGS_TOPIC);
        assert_eq!(json["data"]["species"], "Mus musculus");
        assert_eq!(json["data"]["brain_region"], "");
        assert_eq!(json["data"]["reload"], false);
    }
}
