use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::column::{ColumnDescriptor, ColumnType};
use super::registry::ResourceDescriptor;

/// Required columns the payload does not satisfy, in declaration order
///
/// A value counts as present when the key is supplied and non-null. Text-like
/// columns accept any string, including the empty string; every other type
/// requires a non-blank value.
pub fn missing_required(
    descriptor: &ResourceDescriptor,
    payload: &Map<String, Value>,
) -> Vec<String> {
    let mut missing = Vec::new();
    for column in descriptor.required_columns() {
        let satisfied = match payload.get(column.name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => {
                column.ty.is_text_like() || !s.trim().is_empty()
            }
            Some(_) => true,
        };
        if !satisfied {
            missing.push(column.name.to_string());
        }
    }
    missing
}

/// Normalize a payload value against its column descriptor
///
/// - empty string becomes null for nullable columns;
/// - date columns accept `dd/mm/yyyy` and `yyyy-mm-dd[THH:MM:SS...]`, both
///   normalized to `yyyy-mm-dd`;
/// - numeric columns coerce numeric strings (thousands separators stripped),
///   unparseable strings become null.
pub fn normalize(column: &ColumnDescriptor, value: Value) -> Value {
    let value = match value {
        Value::String(s) if s.is_empty() && column.nullable => Value::Null,
        other => other,
    };

    match column.ty {
        ColumnType::Date => normalize_date(value),
        ColumnType::Integer | ColumnType::Decimal => normalize_number(column.ty, value),
        _ => value,
    }
}

fn normalize_date(value: Value) -> Value {
    match value {
        Value::String(s) => match normalize_date_string(&s) {
            Some(normalized) => Value::String(normalized),
            // leave unrecognized forms for the database to reject
            None => Value::String(s),
        },
        other => other,
    }
}

/// Normalize a date string to `yyyy-mm-dd`, or None when unrecognized
pub fn normalize_date_string(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    // ISO-like: keep the date part of `yyyy-mm-dd`, `yyyy-mm-ddTHH:MM:SS`
    // or `yyyy-mm-dd HH:MM:SS`
    if let Some(head) = trimmed.get(..10) {
        if NaiveDate::parse_from_str(head, "%Y-%m-%d").is_ok() {
            let rest = &trimmed[10..];
            if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
                return Some(head.to_string());
            }
        }
    }
    None
}

fn normalize_number(ty: ColumnType, value: Value) -> Value {
    match value {
        Value::String(s) => match parse_number(&s) {
            Some(n) if ty == ColumnType::Integer && n.fract() == 0.0 => {
                Value::Number((n as i64).into())
            }
            Some(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            None => Value::Null,
        },
        other => other,
    }
}

/// Parse a numeric string, tolerating thousands separators (`"1,234.50"`)
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_col(name: &'static str) -> ColumnDescriptor {
        ColumnDescriptor::new(name, ColumnType::Text).len(255)
    }

    #[test]
    fn empty_string_becomes_null_only_when_nullable() {
        let nullable = text_col("status");
        assert_eq!(normalize(&nullable, json!("")), Value::Null);

        let required = text_col("nombre").not_null();
        assert_eq!(normalize(&required, json!("")), json!(""));
    }

    #[test]
    fn dd_mm_yyyy_dates_are_normalized() {
        let col = ColumnDescriptor::new("fecha", ColumnType::Date).not_null();
        assert_eq!(normalize(&col, json!("31/01/2025")), json!("2025-01-31"));
    }

    #[test]
    fn iso_datetime_is_truncated_to_date() {
        let col = ColumnDescriptor::new("fecha", ColumnType::Date).not_null();
        assert_eq!(
            normalize(&col, json!("2025-06-15T00:00:00Z")),
            json!("2025-06-15")
        );
        assert_eq!(normalize(&col, json!("2025-06-15")), json!("2025-06-15"));
    }

    #[test]
    fn unrecognized_date_passes_through() {
        let col = ColumnDescriptor::new("fecha", ColumnType::Date).not_null();
        assert_eq!(normalize(&col, json!("mañana")), json!("mañana"));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let col = ColumnDescriptor::new("monto", ColumnType::Decimal);
        assert_eq!(normalize(&col, json!("1,234.50")), json!(1234.50));
        assert_eq!(normalize(&col, json!("42")), json!(42.0));

        let int_col = ColumnDescriptor::new("anno", ColumnType::Integer);
        assert_eq!(normalize(&int_col, json!("2025")), json!(2025));
    }

    #[test]
    fn unparseable_number_becomes_null() {
        let col = ColumnDescriptor::new("monto", ColumnType::Decimal);
        assert_eq!(normalize(&col, json!("mucho")), Value::Null);
    }

    #[test]
    fn missing_required_lists_exactly_the_absent_columns() {
        let registry = crate::schema::SchemaRegistry::new();
        let descriptor = registry.resource("presupuestos").unwrap();

        let payload = json!({ "nombre": "Q1", "anno": 2025 });
        let missing = missing_required(descriptor, payload.as_object().unwrap());
        assert_eq!(missing, vec!["fecha_ini", "fecha_fin"]);
    }

    #[test]
    fn empty_string_satisfies_required_text_but_not_required_date() {
        let registry = crate::schema::SchemaRegistry::new();
        let descriptor = registry.resource("presupuestos").unwrap();

        let payload = json!({
            "nombre": "",
            "anno": 2025,
            "fecha_ini": "",
            "fecha_fin": "2025-12-31"
        });
        let missing = missing_required(descriptor, payload.as_object().unwrap());
        assert_eq!(missing, vec!["fecha_ini"]);
    }
}
