//! URL builders for the validation REST API

use url::form_urlencoded;
use vfb_core::{encode_filters, Collection, EntityKind, FilterConfiguration, FragmentToken};

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// `GET <base>/models/?<filters>` or `GET <base>/tests/?<filters>`
pub fn collection_url(base_url: &str, collection: Collection, filters: &FilterConfiguration) -> String {
    format!(
        "{}/{}/?{}",
        base(base_url),
        collection.path(),
        encode_filters(filters)
    )
}

/// Single-entity lookup for a fragment token.
pub fn lookup_url(base_url: &str, token: &FragmentToken) -> String {
    let value = encode_value(&token.value);
    match token.entity_kind() {
        EntityKind::Model => format!("{}/models/?{}={}", base(base_url), token.key.remote_param(), value),
        EntityKind::Test => format!("{}/tests/?{}={}", base(base_url), token.key.remote_param(), value),
        EntityKind::Result => format!("{}/results/?order=&id={}", base(base_url), value),
    }
}

/// Results recorded against one model or test.
pub fn results_url(base_url: &str, owner: Collection, id: &str) -> String {
    let param = match owner {
        Collection::Models => "model_id",
        Collection::Tests => "test_id",
    };
    format!("{}/results/?order=&{}={}", base(base_url), param, encode_value(id))
}
