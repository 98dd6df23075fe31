use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One product line of an order after projection. `product_name` is filled in
/// by the product mapping pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// Reduced order shape retaining only the fields used downstream. The
/// `*_name` fields are absent until the corresponding mapping pass runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Value,
    pub order_source: String,
    pub order_source_id: i64,
    pub order_status: i64,
    #[serde(default)]
    pub products: Vec<ProductLine>,
    /// Legacy shape: some historical exports carry a single order-level
    /// product id instead of a line list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// Coerce a JSON scalar into its string form; identifiers arrive as either
/// strings or numbers depending on the source system.
fn coerce_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Project the raw `getOrders` payload into the reduced order shape.
///
/// The response must contain an `orders` array; anything else is a
/// data-shape error. Fields the report never reads are dropped here.
pub fn clean_orders(response: &Value) -> Result<Vec<Order>> {
    let raw_orders = response
        .get("orders")
        .and_then(Value::as_array)
        .context("getOrders response has no `orders` array")?;

    let mut out = Vec::with_capacity(raw_orders.len());
    for item in raw_orders {
        let products: Vec<ProductLine> = item
            .get("products")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().map(project_line).collect())
            .unwrap_or_default();

        // Only treat an order-level product_id as the legacy single-product
        // shape when there is no line list at all.
        let legacy_product_id = if item.get("products").is_none() {
            item.get("product_id").map(coerce_string)
        } else {
            None
        };

        out.push(Order {
            order_id: item.get("order_id").cloned().unwrap_or(Value::Null),
            order_source: item
                .get("order_source")
                .map(coerce_string)
                .unwrap_or_default(),
            order_source_id: item
                .get("order_source_id")
                .and_then(value_as_i64)
                .unwrap_or(0),
            order_status: item
                .get("order_status_id")
                .and_then(value_as_i64)
                .unwrap_or(0),
            products,
            product_id: legacy_product_id,
            order_source_name: None,
            order_status_name: None,
            product_name: None,
        });
    }

    Ok(out)
}

fn project_line(p: &Value) -> ProductLine {
    ProductLine {
        product_id: p.get("product_id").map(coerce_string).unwrap_or_default(),
        name: p.get("name").and_then(Value::as_str).map(str::to_string),
        quantity: p.get("quantity").and_then(Value::as_u64),
        product_name: None,
    }
}
