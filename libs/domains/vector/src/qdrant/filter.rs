//! Translation of JSON metadata filters into Qdrant filters.
//!
//! ```json
//! {"genre": "docs", "year": {"$gte": 2020}, "lang": {"$in": ["en", "de"]}}
//! ```
//!
//! Every top-level key must hold. A scalar means equality; an object lists
//! operators (`$eq`, `$ne`, `$in`, `$nin`, `$lt`, `$lte`, `$gt`, `$gte`).

use qdrant_client::qdrant::{Condition, Filter, Range};
use serde_json::{Map, Value};

use crate::error::{VectorError, VectorResult};

#[derive(Default)]
struct Clauses {
    must: Vec<Condition>,
    must_not: Vec<Condition>,
}

pub fn to_qdrant_filter(filter: &Value) -> VectorResult<Option<Filter>> {
    let fields = match filter {
        Value::Null => return Ok(None),
        Value::Object(fields) if fields.is_empty() => return Ok(None),
        Value::Object(fields) => fields,
        other => return Err(invalid(format!("filter must be an object, got {}", other))),
    };

    let mut clauses = Clauses::default();
    for (field, condition) in fields {
        match condition {
            Value::Object(ops) => apply_operators(&mut clauses, field, ops)?,
            scalar => clauses.must.push(equals(field, scalar)?),
        }
    }

    Ok(Some(Filter {
        must: clauses.must,
        must_not: clauses.must_not,
        ..Default::default()
    }))
}

fn apply_operators(clauses: &mut Clauses, field: &str, ops: &Map<String, Value>) -> VectorResult<()> {
    if ops.is_empty() {
        return Err(invalid(format!("empty condition for '{}'", field)));
    }

    for (op, operand) in ops {
        match op.as_str() {
            "$eq" => clauses.must.push(equals(field, operand)?),
            "$ne" => clauses.must_not.push(equals(field, operand)?),
            "$in" => clauses.must.push(any_of(field, operand)?),
            "$nin" => clauses.must_not.push(any_of(field, operand)?),
            "$lt" => clauses.must.push(range(field, operand, |r, x| r.lt = Some(x))?),
            "$lte" => clauses.must.push(range(field, operand, |r, x| r.lte = Some(x))?),
            "$gt" => clauses.must.push(range(field, operand, |r, x| r.gt = Some(x))?),
            "$gte" => clauses.must.push(range(field, operand, |r, x| r.gte = Some(x))?),
            other => {
                return Err(invalid(format!(
                    "unsupported filter operator '{}' on '{}'",
                    other, field
                )));
            }
        }
    }
    Ok(())
}

fn equals(field: &str, value: &Value) -> VectorResult<Condition> {
    match value {
        Value::String(s) => Ok(Condition::matches(field, s.clone())),
        Value::Bool(b) => Ok(Condition::matches(field, *b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Condition::matches(field, i)),
            // Keyword matching has no float form; a closed range pins the value.
            None => {
                let x = number(field, value)?;
                Ok(Condition::range(
                    field,
                    Range {
                        gte: Some(x),
                        lte: Some(x),
                        ..Default::default()
                    },
                ))
            }
        },
        other => Err(invalid(format!(
            "'{}' must compare against a string, number or boolean, got {}",
            field, other
        ))),
    }
}

fn any_of(field: &str, value: &Value) -> VectorResult<Condition> {
    let Value::Array(items) = value else {
        return Err(invalid(format!("'{}' expects an array operand", field)));
    };

    if let Some(strings) = items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
    {
        return Ok(Condition::matches(field, strings));
    }

    if let Some(ints) = items.iter().map(Value::as_i64).collect::<Option<Vec<_>>>() {
        return Ok(Condition::matches(field, ints));
    }

    Err(invalid(format!(
        "'{}' expects an array of strings or an array of integers",
        field
    )))
}

fn range(field: &str, value: &Value, set: impl FnOnce(&mut Range, f64)) -> VectorResult<Condition> {
    let mut r = Range::default();
    set(&mut r, number(field, value)?);
    Ok(Condition::range(field, r))
}

fn number(field: &str, value: &Value) -> VectorResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| invalid(format!("'{}' expects a numeric operand", field)))
}

fn invalid(message: String) -> VectorError {
    VectorError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translate(value: Value) -> Filter {
        to_qdrant_filter(&value).unwrap().unwrap()
    }

    #[test]
    fn test_empty_filters_are_none() {
        assert!(to_qdrant_filter(&Value::Null).unwrap().is_none());
        assert!(to_qdrant_filter(&json!({})).unwrap().is_none());
    }

    #[test]
    fn test_scalars_are_equality() {
        let filter = translate(json!({"genre": "docs", "year": 2020, "draft": false, "w": 0.5}));
        assert_eq!(filter.must.len(), 4);
        assert!(filter.must_not.is_empty());
    }

    #[test]
    fn test_operators() {
        let filter = translate(json!({
            "year": {"$gte": 2020, "$lt": 2024},
            "lang": {"$in": ["en", "de"]},
            "status": {"$ne": "archived"},
            "shard": {"$nin": [1, 2]}
        }));
        assert_eq!(filter.must.len(), 3);
        assert_eq!(filter.must_not.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let err = to_qdrant_filter(&json!({"a": {"$regex": "x"}})).unwrap_err();
        assert!(matches!(err, VectorError::Validation(_)));
        assert!(err.to_string().contains("$regex"));
    }

    #[test]
    fn test_rejects_malformed_operands() {
        for bad in [
            json!("genre"),
            json!({"a": null}),
            json!({"a": [1, 2]}),
            json!({"a": {}}),
            json!({"a": {"$in": "x"}}),
            json!({"a": {"$in": [1, "x"]}}),
            json!({"a": {"$gt": "ten"}}),
        ] {
            assert!(
                matches!(to_qdrant_filter(&bad), Err(VectorError::Validation(_))),
                "accepted {}",
                bad
            );
        }
    }
}
