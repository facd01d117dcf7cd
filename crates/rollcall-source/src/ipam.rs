//! phpIPAM addresses record source
//!
//! Queries the addresses controller filtered on a custom field and maps each
//! address to a raw record: the IP is the identifier, the hostname the
//! display name, and the custom fields become extended attributes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use rollcall_core::{AttributeValue, HostFilter, RawRecord};

use crate::error::SourceError;
use crate::traits::RecordSource;

/// Connection settings for the phpIPAM API.
#[derive(Debug, Clone, Deserialize)]
pub struct IpamProvider {
    /// API base URL, e.g. `https://ipam.example.com/api`.
    pub url: String,
    /// Name of the API key ("app id").
    pub app_id: String,
    /// Static token sent in the `token` header.
    pub token: String,
}

/// Server-side custom-field filter for the addresses query.
#[derive(Debug, Clone, Deserialize)]
pub struct IpamQuery {
    /// Custom field the server filters on.
    #[serde(default = "default_filter_field")]
    pub filter_field: String,
    /// Value the field must carry for the address to be returned.
    #[serde(default = "default_filter_value")]
    pub filter_value: String,
}

fn default_filter_field() -> String {
    "custom_managed".to_string()
}

fn default_filter_value() -> String {
    "Yes".to_string()
}

impl Default for IpamQuery {
    fn default() -> Self {
        Self {
            filter_field: default_filter_field(),
            filter_value: default_filter_value(),
        }
    }
}

/// One address row from the addresses controller.
#[derive(Debug, Clone, Deserialize)]
struct AddressEntry {
    ip: Option<String>,
    hostname: Option<String>,
    #[serde(default)]
    custom_fields: BTreeMap<String, AttributeValue>,
}

impl From<AddressEntry> for RawRecord {
    fn from(entry: AddressEntry) -> Self {
        RawRecord {
            identifier: entry.ip,
            display_name: entry.hostname,
            group_key: None,
            extattrs: entry.custom_fields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddressesResponse {
    #[serde(default)]
    data: Vec<AddressEntry>,
}

/// phpIPAM-backed record source.
pub struct IpamSource {
    client: Client,
    endpoint: Url,
    token: String,
}

impl IpamSource {
    /// Create a source for the given provider and query.
    ///
    /// # Errors
    /// Returns an error if the provider URL does not parse.
    pub fn new(provider: &IpamProvider, query: IpamQuery) -> Result<Self, SourceError> {
        let mut endpoint = Url::parse(provider.url.trim_end_matches('/'))?;
        endpoint
            .query_pairs_mut()
            .append_pair("app_id", &provider.app_id)
            .append_pair("controller", "addresses")
            .append_pair("action", "get")
            .append_pair("filter_by", &query.filter_field)
            .append_pair("filter_value", &query.filter_value);

        Ok(Self {
            client: Client::new(),
            endpoint,
            token: provider.token.clone(),
        })
    }
}

#[async_trait]
impl RecordSource for IpamSource {
    // The addresses controller has no per-host query; single-host requests
    // are narrowed later by the builder's host filter.
    #[instrument(skip(self))]
    async fn fetch(&self, _filter: &HostFilter) -> Result<Vec<RawRecord>, SourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("token", &self.token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, message });
        }

        let body: AddressesResponse = response.json().await?;
        debug!(count = body.data.len(), "fetched addresses");

        Ok(body.data.into_iter().map(RawRecord::from).collect())
    }

    fn source_type(&self) -> &'static str {
        "phpipam"
    }
}
