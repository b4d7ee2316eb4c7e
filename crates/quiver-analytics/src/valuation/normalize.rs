//! Position validation.

use quiver_core::{CoreError, CoreResult, Position};
use serde_json::{Map, Value};

/// Validates positions and returns trimmed copies.
///
/// Checks, per row:
/// - `ticker` is non-empty after trimming
/// - `quantity` is finite and `>= 0`
/// - `avg_cost`, when present, is finite and `>= 0`
///
/// Tickers and asset classes are trimmed; a blank asset class becomes
/// `None`. The input is never modified and `normalize(normalize(x))`
/// equals `normalize(x)`.
///
/// # Errors
///
/// Returns `CoreError::Validation` for the first offending row.
pub fn normalize(positions: &[Position]) -> CoreResult<Vec<Position>> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| normalize_row(index, position))
        .collect()
}

fn normalize_row(index: usize, position: &Position) -> CoreResult<Position> {
    let ticker = position.ticker.trim();
    if ticker.is_empty() {
        return Err(CoreError::invalid_row(index, "ticker", "must be a non-empty string"));
    }

    if !(position.quantity.is_finite() && position.quantity >= 0.0) {
        return Err(CoreError::invalid_row(
            index,
            "quantity",
            "must be a finite number >= 0",
        ));
    }

    if let Some(cost) = position.avg_cost {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(CoreError::invalid_row(
                index,
                "avgCost",
                "must be a finite number >= 0",
            ));
        }
    }

    let asset_class = position
        .asset_class
        .as_deref()
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .map(str::to_string);

    Ok(Position {
        ticker: ticker.to_string(),
        quantity: position.quantity,
        avg_cost: position.avg_cost,
        asset_class,
    })
}

/// Validates an untyped JSON document of positions.
///
/// The document must be an array of objects with a string `ticker`, a
/// numeric `quantity`, and optionally a numeric `avgCost` (or `avg_cost`)
/// and a string `assetClass` (or `asset_class`). `null` optional fields
/// are treated as absent. The decoded rows are then passed through
/// [`normalize`].
///
/// # Errors
///
/// Returns `CoreError::Validation` for a non-array document or the first
/// row with a missing or mistyped field.
pub fn normalize_json(document: &Value) -> CoreResult<Vec<Position>> {
    let rows = document
        .as_array()
        .ok_or_else(|| CoreError::invalid_input("positions", "must be an array"))?;

    let positions = rows
        .iter()
        .enumerate()
        .map(|(index, row)| decode_row(index, row))
        .collect::<CoreResult<Vec<_>>>()?;

    normalize(&positions)
}

fn decode_row(index: usize, row: &Value) -> CoreResult<Position> {
    let object = row
        .as_object()
        .ok_or_else(|| CoreError::invalid_row(index, "row", "must be an object"))?;

    let ticker = match field(object, "ticker", "ticker") {
        Some(Value::String(ticker)) => ticker.clone(),
        _ => return Err(CoreError::invalid_row(index, "ticker", "must be a string")),
    };

    let quantity = field(object, "quantity", "quantity")
        .and_then(Value::as_f64)
        .ok_or_else(|| CoreError::invalid_row(index, "quantity", "must be a number"))?;

    let avg_cost = match field(object, "avgCost", "avg_cost") {
        None => None,
        Some(value) => Some(
            value
                .as_f64()
                .ok_or_else(|| CoreError::invalid_row(index, "avgCost", "must be a number"))?,
        ),
    };

    let asset_class = match field(object, "assetClass", "asset_class") {
        None => None,
        Some(Value::String(class)) => Some(class.clone()),
        Some(_) => {
            return Err(CoreError::invalid_row(index, "assetClass", "must be a string"));
        }
    };

    Ok(Position {
        ticker,
        quantity,
        avg_cost,
        asset_class,
    })
}

/// Looks up a field by its camelCase or snake_case name, skipping `null`.
fn field<'a>(object: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    object
        .get(camel)
        .or_else(|| object.get(snake))
        .filter(|value| !value.is_null())
}
