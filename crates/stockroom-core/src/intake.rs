//! # Product Intake
//!
//! Turns a raw `POST /api/products` JSON body into a validated [`NewProduct`].
//!
//! ## Check Order
//! ```text
//! body is an object?                        no → "Request body must be a JSON object"
//!      │
//! name, sku, price, initial_quantity,       first absent/null key → "<field> is required"
//! warehouses present?
//!      │
//! price is an exact decimal?                no → "Invalid price format"
//!      │
//! remaining field rules                     → field-specific message
//!      │
//! NewProduct (ready for one transaction)
//! ```
//!
//! Working on `serde_json::Value` instead of a derived struct is what lets the
//! error name the exact missing field in request order.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_name, validate_product_type, validate_sku,
    validate_stock_quantity, ValidationResult,
};
use crate::MAX_WAREHOUSES_PER_PRODUCT;

/// Keys every intake request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "sku", "price", "initial_quantity", "warehouses"];

/// A validated product ready to be persisted together with its stock rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub initial_quantity: i64,
    pub product_type: Option<String>,
    pub supplier_id: Option<String>,
    pub inventory: Vec<NewInventory>,
}

/// Opening stock for one warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventory {
    pub warehouse_id: String,
    pub quantity: i64,
}

impl NewProduct {
    /// Validates a raw request body.
    ///
    /// ## Example
    /// ```rust
    /// use serde_json::json;
    /// use stockroom_core::NewProduct;
    ///
    /// let body = json!({
    ///     "name": "Hex Bolt M8",
    ///     "sku": "BOLT-M8",
    ///     "price": "0.35",
    ///     "initial_quantity": 100,
    ///     "warehouses": [{"warehouse_id": "wh-1"}, {"warehouse_id": "wh-2", "quantity": 40}]
    /// });
    /// let product = NewProduct::from_json(&body).unwrap();
    /// assert_eq!(product.price.cents(), 35);
    /// assert_eq!(product.inventory[0].quantity, 100);
    /// assert_eq!(product.inventory[1].quantity, 40);
    /// ```
    pub fn from_json(body: &Value) -> ValidationResult<Self> {
        let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

        for field in REQUIRED_FIELDS {
            if is_absent(obj.get(field)) {
                return Err(ValidationError::required(field));
            }
        }

        // Price first: a malformed price is the one format error the
        // endpoint reports before any other field rule.
        let price = parse_price(&obj["price"])?;
        validate_price(price)?;

        let name = require_str(obj, "name")?.trim().to_string();
        validate_product_name(&name)?;

        let sku = require_str(obj, "sku")?.trim().to_string();
        validate_sku(&sku)?;

        let initial_quantity = parse_quantity("initial_quantity", &obj["initial_quantity"])?;

        let product_type = optional_str(obj, "product_type")?
            .map(|t| -> ValidationResult<String> {
                validate_product_type(t)?;
                Ok(t.trim().to_string())
            })
            .transpose()?;

        let supplier_id = optional_str(obj, "supplier_id")?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let inventory = parse_warehouses(&obj["warehouses"], initial_quantity)?;

        Ok(NewProduct {
            name,
            sku,
            price,
            initial_quantity,
            product_type,
            supplier_id,
            inventory,
        })
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn parse_price(value: &Value) -> ValidationResult<Money> {
    match value {
        Value::String(s) => Money::parse_decimal(s),
        // serde_json renders numbers in their shortest round-trip form, so
        // 10.99 arrives here as "10.99" rather than its binary expansion.
        Value::Number(n) => Money::parse_decimal(&n.to_string()),
        other => Err(ValidationError::InvalidPriceFormat {
            input: other.to_string(),
        }),
    }
}

fn parse_quantity(field: &str, value: &Value) -> ValidationResult<i64> {
    let qty = value
        .as_i64()
        .ok_or_else(|| ValidationError::invalid(field, "must be a whole number"))?;
    validate_stock_quantity(field, qty)?;
    Ok(qty)
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::invalid(field, "must be a string"))
}

fn optional_str<'a>(obj: &'a Map<String, Value>, field: &str) -> ValidationResult<Option<&'a str>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ValidationError::invalid(field, "must be a string")),
    }
}

fn parse_warehouses(value: &Value, default_quantity: i64) -> ValidationResult<Vec<NewInventory>> {
    let entries = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid("warehouses", "must be an array"))?;

    if entries.len() > MAX_WAREHOUSES_PER_PRODUCT {
        return Err(ValidationError::TooMany {
            field: "warehouses".to_string(),
            max: MAX_WAREHOUSES_PER_PRODUCT,
        });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut inventory = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("warehouses[{idx}]");
        let entry = entry
            .as_object()
            .ok_or_else(|| ValidationError::invalid(&path, "must be an object"))?;

        let id_field = format!("{path}.warehouse_id");
        let warehouse_id = match entry.get("warehouse_id") {
            None | Some(Value::Null) => return Err(ValidationError::required(id_field)),
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::String(_)) => return Err(ValidationError::required(id_field)),
            Some(Value::Number(n)) if n.is_u64() => n.to_string(),
            Some(_) => {
                return Err(ValidationError::invalid(
                    id_field,
                    "must be a string or a non-negative integer",
                ))
            }
        };

        let quantity = match entry.get("quantity") {
            None | Some(Value::Null) => default_quantity,
            Some(q) => parse_quantity(&format!("{path}.quantity"), q)?,
        };

        if !seen.insert(warehouse_id.clone()) {
            return Err(ValidationError::Duplicate {
                field: "warehouse_id".to_string(),
                value: warehouse_id,
            });
        }

        inventory.push(NewInventory {
            warehouse_id,
            quantity,
        });
    }

    Ok(inventory)
}

// =============================================================================
// Unit Tests
// =============================================================================
