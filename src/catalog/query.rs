use crate::catalog::CatalogError;
use crate::domain::ModelCode;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://www.tesla.com/inventory/api/v1/inventory-results";

// {
//   "query": {
//     "model", "condition", "options", "arrangeby", "order",
//     "market", "language", "super_region",
//     "lng", "lat", "zip", "range", "region"
//   },
//   "offset", "count", "outsideOffset", "outsideSearch"
// }

/// Everything sent to the catalog for one partition. Serialized as JSON into
/// the `query` URL parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub query: QueryFilter,
    pub offset: u32,
    pub count: u32,
    pub outside_offset: u32,
    pub outside_search: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFilter {
    pub model: String,
    pub condition: String,
    pub options: Map<String, Value>,
    #[serde(rename = "arrangeby")]
    pub arrange_by: String,
    pub order: String,
    pub market: String,
    pub language: String,
    pub super_region: String,
    pub lng: f64,
    pub lat: f64,
    pub zip: String,
    pub range: u32,
    pub region: String,
}

impl Default for CatalogQuery {
    /// Used listings, cheapest first, first 50 results, UK market.
    fn default() -> Self {
        Self {
            query: QueryFilter {
                model: ModelCode::ModelS.as_str().to_string(),
                condition: "used".to_string(),
                options: Map::new(),
                arrange_by: "Price".to_string(),
                order: "asc".to_string(),
                market: "GB".to_string(),
                language: "en".to_string(),
                super_region: "north america".to_string(),
                lng: -1.5151,
                lat: 54.5554,
                zip: "DL1".to_string(),
                range: 0,
                region: "ON".to_string(),
            },
            offset: 0,
            count: 50,
            outside_offset: 0,
            outside_search: false,
        }
    }
}

impl CatalogQuery {
    /// Same query, pointed at another product line.
    pub fn with_model(&self, model: &ModelCode) -> Self {
        let mut query = self.clone();
        query.query.model = model.as_str().to_string();
        query
    }

    pub fn to_url(&self, endpoint: &str) -> Result<Url, CatalogError> {
        let encoded =
            serde_json::to_string(self).map_err(|e| CatalogError::JsonParse(e.to_string()))?;

        Url::parse_with_params(endpoint, &[("query", encoded)])
            .map_err(|e| CatalogError::Network(format!("Bad catalog URL {endpoint}: {e}")))
    }
}
