//! Infoblox NIOS WAPI record source
//!
//! Queries `record:host` objects and maps them to raw records: the record
//! name doubles as the identifier and the DNS view becomes the group key.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use rollcall_core::{AttributeValue, HostFilter, RawRecord};

use crate::error::SourceError;
use crate::traits::RecordSource;

/// Connection settings for the WAPI endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NiosProvider {
    /// Base URL including the WAPI version, e.g. `https://nios.example.com/wapi/v2.9`.
    pub url: String,
    /// Basic-auth user.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

/// Server-side filters applied to the host-record query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NiosFilters {
    /// Restrict to one DNS view.
    pub view: Option<String>,
    /// Extended-attribute equality filters.
    #[serde(default)]
    pub extattrs: BTreeMap<String, String>,
}

/// Host record as returned by `record:host`.
#[derive(Debug, Clone, Deserialize)]
struct HostRecord {
    name: Option<String>,
    view: Option<String>,
    #[serde(default)]
    extattrs: BTreeMap<String, AttributeValue>,
}

impl From<HostRecord> for RawRecord {
    fn from(record: HostRecord) -> Self {
        RawRecord {
            identifier: record.name,
            display_name: None,
            group_key: record.view,
            extattrs: record.extattrs,
        }
    }
}

/// WAPI-backed record source.
pub struct NiosSource {
    client: Client,
    endpoint: Url,
    username: String,
    password: String,
    filters: NiosFilters,
}

impl NiosSource {
    /// Create a source for the given provider and filters.
    ///
    /// # Errors
    /// Returns an error if the provider URL does not parse.
    pub fn new(provider: &NiosProvider, filters: NiosFilters) -> Result<Self, SourceError> {
        let endpoint = Url::parse(&format!(
            "{}/record:host",
            provider.url.trim_end_matches('/')
        ))?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            username: provider.username.clone(),
            password: provider.password.clone(),
            filters,
        })
    }

    fn query_url(&self, filter: &HostFilter) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("_return_fields", "name,view,extattrs");
            if let HostFilter::Host(name) = filter {
                pairs.append_pair("name", name);
            }
            if let Some(view) = &self.filters.view {
                pairs.append_pair("view", view);
            }
            // WAPI spells extended-attribute filters with a leading `*`.
            for (attr, value) in &self.filters.extattrs {
                pairs.append_pair(&format!("*{attr}"), value);
            }
        }
        url
    }
}

#[async_trait]
impl RecordSource for NiosSource {
    #[instrument(skip(self))]
    async fn fetch(&self, filter: &HostFilter) -> Result<Vec<RawRecord>, SourceError> {
        let url = self.query_url(filter);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, message });
        }

        let records: Vec<HostRecord> = response.json().await?;
        debug!(count = records.len(), "fetched host records");

        Ok(records.into_iter().map(RawRecord::from).collect())
    }

    fn source_type(&self) -> &'static str {
        "nios"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_record_payload_maps_to_raw_records() {
        let payload = json!([
            {
                "_ref": "record:host/ZG5zLmhvc3Q:web01/default",
                "name": "web01.example.net",
                "view": "default",
                "extattrs": {
                    "Site": {"value": "hq"},
                    "ansible_user": {"value": "deploy"}
                }
            },
            {
                "name": "db01.example.net",
                "view": "internal"
            }
        ]);

        let records: Vec<HostRecord> = serde_json::from_value(payload).unwrap();
        let raw: Vec<RawRecord> = records.into_iter().map(RawRecord::from).collect();

        assert_eq!(raw[0].identifier.as_deref(), Some("web01.example.net"));
        assert_eq!(raw[0].group_key.as_deref(), Some("default"));
        assert_eq!(raw[0].extattrs.len(), 2);
        assert_eq!(raw[1].identifier.as_deref(), Some("db01.example.net"));
        assert!(raw[1].extattrs.is_empty());
    }

    #[test]
    fn test_query_url_carries_filters() {
        let provider = NiosProvider {
            url: "https://nios.example.net/wapi/v2.9/".to_string(),
            username: "api".to_string(),
            password: "secret".to_string(),
        };
        let filters = NiosFilters {
            view: Some("internal".to_string()),
            extattrs: BTreeMap::from([("Site".to_string(), "hq".to_string())]),
        };
        let source = NiosSource::new(&provider, filters).unwrap();

        let url = source.query_url(&HostFilter::Host("web01".to_string()));
        assert_eq!(url.path(), "/wapi/v2.9/record:host");

        let query = url.query().unwrap();
        assert!(query.contains("_return_fields=name%2Cview%2Cextattrs"));
        assert!(query.contains("name=web01"));
        assert!(query.contains("view=internal"));
        assert!(query.contains("*Site=hq") || query.contains("%2ASite=hq"));
    }

    #[test]
    fn test_invalid_provider_url_is_rejected() {
        let provider = NiosProvider {
            url: "not a url".to_string(),
            username: String::new(),
            password: String::new(),
        };
        assert!(NiosSource::new(&provider, NiosFilters::default()).is_err());
    }
}
