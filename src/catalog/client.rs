// client.rs
use crate::catalog::{CatalogError, CatalogQuery};
use crate::domain::{InventoryRecord, ModelCode};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// One query per product line against some inventory catalog.
pub trait InventorySource: Sync {
    fn fetch_model_inventory(&self, model: &ModelCode)
        -> Result<Vec<InventoryRecord>, CatalogError>;
}

pub struct CatalogClient {
    client: Client,
    endpoint: String,
    template: CatalogQuery,
}

impl CatalogClient {
    /// `template` supplies every query parameter except the product line.
    pub fn new(endpoint: impl Into<String>, template: CatalogQuery) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            template,
        })
    }

    fn fetch_body(&self, model: &ModelCode) -> Result<String, CatalogError> {
        let url = self.template.with_model(model).to_url(&self.endpoint)?;
        debug!("Querying catalog for {model}: {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

impl InventorySource for CatalogClient {
    fn fetch_model_inventory(
        &self,
        model: &ModelCode,
    ) -> Result<Vec<InventoryRecord>, CatalogError> {
        let body = self.fetch_body(model)?;
        parse_inventory_response(&body)
    }
}

/// Maps a catalog response body into canonical records.
///
/// A body that isn't JSON, or whose `results` isn't a list, fails the whole
/// partition. Individual entries that aren't objects are dropped; everything
/// else is kept whatever its field types.
pub fn parse_inventory_response(body: &str) -> Result<Vec<InventoryRecord>, CatalogError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| CatalogError::JsonParse(e.to_string()))?;

    if !data.is_object() {
        return Err(CatalogError::UnexpectedShape(
            "response is not an object".to_string(),
        ));
    }

    // The catalog sends `{}` instead of `[]` when nothing matches.
    let arr = match data.get("results") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(obj)) if obj.is_empty() => return Ok(Vec::new()),
        Some(Value::Array(arr)) => arr,
        Some(_) => {
            return Err(CatalogError::UnexpectedShape(
                "results is not a list".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(arr.len());
    for (idx, v) in arr.iter().enumerate() {
        if !v.is_object() {
            warn!("Skipping listing #{idx}: not an object");
            continue;
        }
        match serde_json::from_value::<InventoryRecord>(v.clone()) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed listing #{idx}: {e}"),
        }
    }

    Ok(records)
}
