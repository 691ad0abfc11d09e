//! Response models for the communications endpoint
//!
//! The endpoint answers with an object holding an `items` array and, depending
//! on the deployment, a total under one of several field names.

use crate::config::TotalCountConfig;
use crate::domain::errors::{DjenError, FetchError};
use crate::domain::record::RawRecord;
use serde_json::Value;
use std::str::FromStr;

/// Unit of the declared total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalUnit {
    /// The total counts items
    Items,
    /// The total counts pages
    Pages,
}

impl FromStr for TotalUnit {
    type Err = DjenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "items" => Ok(TotalUnit::Items),
            "pages" => Ok(TotalUnit::Pages),
            _ => Err(DjenError::Configuration(format!(
                "Invalid total count unit: {s}. Must be 'items' or 'pages'"
            ))),
        }
    }
}

/// Which response fields carry the declared total, and in which unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalCountFields {
    pub fields: Vec<String>,
    pub unit: TotalUnit,
}

impl TotalCountFields {
    /// Create from the `[api.total_count]` section
    pub fn from_config(config: &TotalCountConfig) -> Result<Self, DjenError> {
        Ok(Self {
            fields: config.fields.clone(),
            unit: TotalUnit::from_str(&config.unit)?,
        })
    }

    /// Reads the first candidate field holding a non-negative integer
    ///
    /// Numeric strings are accepted.
    pub fn read(&self, body: &serde_json::Map<String, Value>) -> Option<DeclaredTotal> {
        let value = self
            .fields
            .iter()
            .filter_map(|field| body.get(field))
            .find_map(as_count)?;

        Some(match self.unit {
            TotalUnit::Items => DeclaredTotal::Items(value),
            TotalUnit::Pages => DeclaredTotal::Pages(value),
        })
    }
}

impl Default for TotalCountFields {
    fn default() -> Self {
        Self {
            fields: vec![
                "count".to_string(),
                "totalElements".to_string(),
                "totalPages".to_string(),
            ],
            unit: TotalUnit::Items,
        }
    }
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Total reported by the server on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredTotal {
    Items(u64),
    Pages(u64),
}

impl DeclaredTotal {
    /// True when the server declares an empty result set
    pub fn is_zero(&self) -> bool {
        matches!(self, DeclaredTotal::Items(0) | DeclaredTotal::Pages(0))
    }
}

/// One page of results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub items: Vec<RawRecord>,
    pub declared_total: Option<DeclaredTotal>,
}

impl PageResult {
    pub fn new(items: Vec<RawRecord>, declared_total: Option<DeclaredTotal>) -> Self {
        Self {
            items,
            declared_total,
        }
    }
}

/// Parses a successful response body
///
/// # Errors
///
/// Returns [`FetchError::InvalidResponse`] when the body is not a JSON object
/// with an `items` array.
pub fn parse_page(body: &str, totals: &TotalCountFields) -> Result<PageResult, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::InvalidResponse(format!("body is not valid JSON: {e}")))?;

    let Value::Object(object) = value else {
        return Err(FetchError::InvalidResponse(
            "body is not a JSON object".to_string(),
        ));
    };

    let Some(Value::Array(raw_items)) = object.get("items") else {
        return Err(FetchError::InvalidResponse(
            "body has no 'items' array".to_string(),
        ));
    };

    let received = raw_items.len();
    let items: Vec<RawRecord> = raw_items
        .iter()
        .cloned()
        .filter_map(RawRecord::from_value)
        .collect();

    if items.len() < received {
        tracing::warn!(
            dropped = received - items.len(),
            "Dropped non-object entries from items array"
        );
    }

    Ok(PageResult::new(items, totals.read(&object)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_with_count() {
        let body = r#"{"status":"success","count":2,"items":[{"id":1},{"id":2}]}"#;
        let page = parse_page(body, &TotalCountFields::default()).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.declared_total, Some(DeclaredTotal::Items(2)));
    }

    #[test]
    fn test_parse_page_probes_fields_in_order() {
        let body = r#"{"totalElements":"150","items":[]}"#;
        let page = parse_page(body, &TotalCountFields::default()).unwrap();
        assert_eq!(page.declared_total, Some(DeclaredTotal::Items(150)));
    }

    #[test]
    fn test_parse_page_in_pages_unit() {
        let totals = TotalCountFields {
            fields: vec!["totalPages".to_string()],
            unit: TotalUnit::Pages,
        };
        let page = parse_page(r#"{"totalPages":4,"items":[]}"#, &totals).unwrap();
        assert_eq!(page.declared_total, Some(DeclaredTotal::Pages(4)));
    }

    #[test]
    fn test_parse_page_without_total() {
        let page = parse_page(r#"{"items":[{"id":"a"}]}"#, &TotalCountFields::default()).unwrap();
        assert_eq!(page.declared_total, None);
    }

    #[test]
    fn test_parse_page_ignores_negative_total() {
        let page = parse_page(r#"{"count":-1,"items":[]}"#, &TotalCountFields::default()).unwrap();
        assert_eq!(page.declared_total, None);
    }

    #[test]
    fn test_parse_page_drops_non_objects() {
        let page = parse_page(r#"{"items":[{"id":1},"junk",3]}"#, &TotalCountFields::default())
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_parse_page_invalid_bodies() {
        let totals = TotalCountFields::default();
        for body in ["not json", "[1,2]", r#"{"count":3}"#, r#"{"items":{}}"#] {
            let err = parse_page(body, &totals).unwrap_err();
            assert!(matches!(err, FetchError::InvalidResponse(_)), "body: {body}");
        }
    }

    #[test]
    fn test_total_unit_from_str() {
        assert_eq!(TotalUnit::from_str("items").unwrap(), TotalUnit::Items);
        assert_eq!(TotalUnit::from_str("PAGES").unwrap(), TotalUnit::Pages);
        assert!(TotalUnit::from_str("rows").is_err());
    }
}
