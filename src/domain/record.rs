// src/domain/record.rs

use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;

/// Product-line code as it appears in the catalog (`"ms"`, `"m3"`, ...).
/// Unknown codes are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Value")]
pub enum ModelCode {
    ModelS,
    Model3,
    ModelX,
    ModelY,
    Other(String),
}

impl ModelCode {
    /// The product lines queried on every run, in query order.
    pub const KNOWN: [ModelCode; 4] = [
        ModelCode::ModelS,
        ModelCode::Model3,
        ModelCode::ModelX,
        ModelCode::ModelY,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ModelCode::ModelS => "ms",
            ModelCode::Model3 => "m3",
            ModelCode::ModelX => "mx",
            ModelCode::ModelY => "my",
            ModelCode::Other(raw) => raw,
        }
    }
}

impl Default for ModelCode {
    fn default() -> Self {
        ModelCode::Other(String::new())
    }
}

impl From<String> for ModelCode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ms" => ModelCode::ModelS,
            "m3" => ModelCode::Model3,
            "mx" => ModelCode::ModelX,
            "my" => ModelCode::ModelY,
            _ => ModelCode::Other(raw),
        }
    }
}

impl From<&str> for ModelCode {
    fn from(raw: &str) -> Self {
        ModelCode::from(raw.to_string())
    }
}

// Anything that isn't a string is kept as its JSON text.
impl From<Value> for ModelCode {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(s) => ModelCode::from(s),
            Value::Null => ModelCode::default(),
            other => ModelCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ModelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A currency amount exactly as the catalog sent it.
///
/// Text and odd JSON are kept rather than rejected so that a record is only
/// discarded when something actually needs the number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
    Other(Value),
}

impl Amount {
    /// Numeric value for comparisons. `None` for non-numeric text and non-finite values.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Amount::Number(n) => n.as_f64()?,
            Amount::Text(s) => s.trim().parse::<f64>().ok()?,
            Amount::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Text form for storage: `39500.0` becomes `"39500"`, everything else as received.
    pub fn to_price_text(&self) -> String {
        match self {
            Amount::Number(n) if n.is_f64() => match n.as_f64() {
                Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
                _ => n.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(s) => f.write_str(s),
            Amount::Other(v) => write!(f, "{v}"),
        }
    }
}

/// One used-vehicle listing, renamed field-for-field from the catalog's casing.
///
/// Nothing here is computed or type-checked: descriptive fields stay as raw
/// JSON so that an odd value never costs us the listing. Only `price` matters
/// for ranking, and it is coerced at ranking time.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    #[serde(rename = "Model")]
    pub model: ModelCode,
    #[serde(rename = "TrimName")]
    pub trim_name: Option<Value>,
    #[serde(rename = "TRIM")]
    pub trim: Option<Value>,
    #[serde(rename = "Year")]
    pub year: Option<Value>,

    // Pricing
    #[serde(rename = "Price")]
    pub price: Option<Amount>,
    #[serde(rename = "TotalPrice")]
    pub total_price: Option<Amount>,
    #[serde(rename = "PurchasePrice")]
    pub purchase_price: Option<Amount>,
    #[serde(rename = "InventoryPrice")]
    pub inventory_price: Option<Amount>,
    #[serde(rename = "Discount")]
    pub discount: Option<Amount>,
    #[serde(rename = "OnConfiguratorPricePercentage")]
    pub on_configurator_price_percentage: Option<Amount>,

    #[serde(rename = "Odometer")]
    pub odometer: Option<Value>,
    #[serde(rename = "OdometerType")]
    pub odometer_type: Option<Value>,
    #[serde(rename = "City")]
    pub city: Option<Value>,
    #[serde(rename = "EtaToDelivery")]
    pub eta_to_delivery: Option<Value>,

    // Options
    #[serde(rename = "BATTERY")]
    pub battery: Option<Value>,
    #[serde(rename = "DRIVE")]
    pub drive: Option<Value>,
    #[serde(rename = "PAINT")]
    pub paint: Option<Value>,
    #[serde(rename = "INTERIOR")]
    pub interior: Option<Value>,
    #[serde(rename = "DECOR")]
    pub decor: Option<Value>,
    #[serde(rename = "AUTOPILOT")]
    pub autopilot: Option<Value>,
    #[serde(rename = "ADL_OPTS")]
    pub adl_opts: Option<Value>,
    #[serde(rename = "IsRangeStandard")]
    pub is_range_standard: Option<Value>,
    #[serde(rename = "DamageDisclosure")]
    pub damage_disclosure: Option<Value>,

    // Warranty
    #[serde(rename = "WarrantyBatteryExpDate")]
    pub warranty_battery_exp_date: Option<Value>,
    #[serde(rename = "WarrantyBatteryIsExpired")]
    pub warranty_battery_is_expired: Option<Value>,
    #[serde(rename = "WarrantyVehicleExpDate")]
    pub warranty_vehicle_exp_date: Option<Value>,
    #[serde(rename = "WarrantyVehicleIsExpired")]
    pub warranty_vehicle_is_expired: Option<Value>,
    #[serde(rename = "WarrantyMile")]
    pub warranty_mile: Option<Value>,
    #[serde(rename = "WarrantyYear")]
    pub warranty_year: Option<Value>,
}

impl InventoryRecord {
    /// The ranking key. `None` means the record cannot be ranked.
    pub fn numeric_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(Amount::as_f64)
    }

    /// Model year for display: an integer, an integral float, or numeric text.
    pub fn model_year(&self) -> Option<i64> {
        match self.year.as_ref()? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Trim description when the catalog sent it as text.
    pub fn trim_text(&self) -> Option<&str> {
        self.trim_name.as_ref().and_then(Value::as_str)
    }
}
