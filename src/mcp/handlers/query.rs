//! Query with client-side aggregation.
//!
//! Fetches one bounded page (the first 100 matching records) and computes
//! the requested aggregations over exactly that page. Page-scoped
//! aggregation is a documented boundary: callers wanting exact totals over
//! large result sets must narrow the filter.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use serde_json::{Map, Value, json};

use super::{records::list_options, require_str};

/// Upper bound on the fetched page aggregations are computed over.
const QUERY_PAGE_SIZE: u32 = 100;

/// Parse an aggregation expression of the form `func(field)`.
fn parse_aggregation(expression: &str) -> Result<(&str, &str), ToolError> {
    let (func, rest) = expression.split_once('(').ok_or_else(|| {
        ToolError::InvalidParams(format!("Invalid aggregation expression: {expression}"))
    })?;
    Ok((func, rest.trim_end_matches(')')))
}

/// Numeric value of a record field for sum/avg; missing and non-numeric
/// values count as 0.
fn numeric_field(record: &Value, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn compute_aggregations(
    aggregate: &Map<String, Value>,
    items: &[Value],
) -> Result<Map<String, Value>, ToolError> {
    let mut aggregations = Map::new();

    for (name, expression) in aggregate {
        let expression = expression.as_str().ok_or_else(|| {
            ToolError::InvalidParams(format!("Aggregation '{name}' must be a string expression"))
        })?;
        let (func, field) = parse_aggregation(expression)?;

        let value = match func {
            "sum" => {
                let total: f64 = items.iter().map(|r| numeric_field(r, field)).sum();
                Value::from(total)
            }
            "avg" => {
                if items.is_empty() {
                    Value::from(0.0)
                } else {
                    let total: f64 = items.iter().map(|r| numeric_field(r, field)).sum();
                    Value::from(total / items.len() as f64)
                }
            }
            "count" => Value::from(items.len() as u64),
            other => {
                return Err(ToolError::InvalidParams(format!(
                    "Unsupported aggregation function: {other}"
                )));
            }
        };
        aggregations.insert(name.clone(), value);
    }

    Ok(aggregations)
}

/// Handle an advanced query with optional aggregation.
pub async fn handle_query_collection<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let options = list_options(&arguments);

    let page = server
        .client
        .list_records(collection, 1, QUERY_PAGE_SIZE, &options)
        .await
        .map_err(|e| ToolError::backend("Failed to query collection", e))?;

    let mut result = json!({"items": page.items});
    if let Some(aggregate) = arguments.get("aggregate").and_then(Value::as_object) {
        let aggregations = compute_aggregations(aggregate, &page.items)?;
        result["aggregations"] = Value::Object(aggregations);
    }

    ToolResult::json(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aggregate(requested: Value, items: Vec<Value>) -> Result<Map<String, Value>, ToolError> {
        let requested = requested.as_object().cloned().unwrap_or_default();
        compute_aggregations(&requested, &items)
    }

    #[test]
    fn sum_coerces_missing_and_non_numeric_to_zero() {
        let items = vec![
            json!({"price": 10}),
            json!({"price": "2.5"}),
            json!({"price": "n/a"}),
            json!({}),
        ];
        let out = aggregate(json!({"total": "sum(price)"}), items).unwrap();
        assert_eq!(out["total"], json!(12.5));
    }

    #[test]
    fn count_ignores_the_field_name() {
        let items = vec![json!({"a": 1}), json!({"b": 2})];
        let out = aggregate(json!({"n": "count(anything)"}), items).unwrap();
        assert_eq!(out["n"], json!(2));
    }

    #[test]
    fn avg_is_sum_over_count() {
        let items = vec![json!({"x": 2}), json!({"x": 4})];
        let out = aggregate(json!({"mean": "avg(x)"}), items).unwrap();
        assert_eq!(out["mean"], json!(3.0));
    }

    #[test]
    fn avg_of_empty_page_is_zero() {
        let out = aggregate(json!({"mean": "avg(x)"}), Vec::new()).unwrap();
        assert_eq!(out["mean"], json!(0.0));
    }

    #[test]
    fn unsupported_function_is_invalid_params() {
        let err = aggregate(json!({"m": "median(price)"}), vec![json!({"price": 1})]).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn expression_without_parentheses_is_invalid() {
        let err = aggregate(json!({"m": "sum price"}), Vec::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }
}
