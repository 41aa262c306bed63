//! Dump decoder
//!
//! Turns one raw per-category JSON document (`{ "data": [...] }`) into an
//! ordered list of [`Record`]s. Dumps are positional and loosely typed, so
//! decoding is best-effort: a malformed entry is logged and defaulted (or
//! skipped when it has no usable name) without affecting the rest of the file.

use serde_json::Value;
use tracing::warn;

use crate::category::Category;
use crate::record::{
    ClassRecord, EnumRecord, EnumValue, Function, FunctionGroup, MemberDescriptor, OffsetEntry,
    OffsetValue, Parameter, Record, ValueShape, INHERIT_KEY, SIZE_KEY,
};

static NULL: Value = Value::Null;

/// Why an individual entry could not be decoded as-is
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeAnomaly {
    #[error("entry is a {0}, expected an object or [name, detail] array")]
    NotAnEntry(&'static str),

    #[error("entry has an empty name")]
    EmptyName,

    #[error("detail of '{name}' is a {found}, expected an array")]
    DetailNotArray { name: String, found: &'static str },

    #[error("sentinel {key} in '{name}' has an unexpected {found} value")]
    BadSentinel {
        name: String,
        key: &'static str,
        found: &'static str,
    },

    #[error("element of '{name}' is a {found}, expected an object")]
    ElementNotObject { name: String, found: &'static str },

    #[error("{field} of '{name}' is {value}, expected a whole number")]
    BadPosition {
        name: String,
        field: &'static str,
        value: String,
    },
}

/// Decode one category document.
///
/// Returns an empty list when `raw` is absent or has no `data` array; that
/// is the "no data" state, not an error.
pub fn decode(category: Category, raw: Option<&Value>) -> Vec<Record> {
    let Some(entries) = raw.and_then(|r| r.get("data")).and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(category, entry) {
            Ok(record) => records.push(record),
            Err(anomaly) => warn!(%category, index, "skipping dump entry: {}", anomaly),
        }
    }
    records
}

fn decode_entry(category: Category, entry: &Value) -> Result<Record, DecodeAnomaly> {
    let (name, detail) = split_entry(entry)?;
    let record = match category {
        Category::Classes | Category::Structs => Record::Class(decode_class(name, detail)),
        Category::Enums => Record::Enum(decode_enum(name, detail)),
        Category::Functions => Record::Functions(decode_functions(name, detail)),
        Category::Offsets => Record::Offset(decode_offset(name, detail)),
    };
    Ok(record)
}

/// Split `{ name: detail }` or `[name, detail]` into its parts
fn split_entry(entry: &Value) -> Result<(String, &Value), DecodeAnomaly> {
    let (name, detail) = match entry {
        Value::Object(map) => match map.iter().next() {
            Some((key, detail)) => (key.clone(), detail),
            None => return Err(DecodeAnomaly::EmptyName),
        },
        Value::Array(items) => match items.first() {
            Some(Value::String(name)) => (name.clone(), items.get(1).unwrap_or(&NULL)),
            Some(Value::Number(n)) => (n.to_string(), items.get(1).unwrap_or(&NULL)),
            _ => return Err(DecodeAnomaly::EmptyName),
        },
        other => return Err(DecodeAnomaly::NotAnEntry(kind_of(other))),
    };

    if name.is_empty() {
        return Err(DecodeAnomaly::EmptyName);
    }
    Ok((name, detail))
}

// ============================================================================
// Classes / Structs
// ============================================================================

/// One element of a class's raw member array, resolved once
enum ClassElement {
    Inherit(Vec<String>),
    Size(u64),
    Member(MemberDescriptor),
}

fn decode_class(name: String, detail: &Value) -> ClassRecord {
    let mut record = ClassRecord {
        name,
        size_bytes: 0,
        inheritance_chain: Vec::new(),
        members: Vec::new(),
    };

    let Some(elements) = detail.as_array() else {
        warn_anomaly(DecodeAnomaly::DetailNotArray {
            name: record.name.clone(),
            found: kind_of(detail),
        });
        return record;
    };

    for element in elements {
        match decode_class_element(&record.name, element) {
            Ok(ClassElement::Inherit(chain)) => record.inheritance_chain = chain,
            Ok(ClassElement::Size(size)) => record.size_bytes = size,
            Ok(ClassElement::Member(member)) => record.members.push(member),
            Err(anomaly) => warn_anomaly(anomaly),
        }
    }
    record
}

fn decode_class_element(owner: &str, element: &Value) -> Result<ClassElement, DecodeAnomaly> {
    let Value::Object(map) = element else {
        return Err(DecodeAnomaly::ElementNotObject {
            name: owner.to_string(),
            found: kind_of(element),
        });
    };

    if let Some(chain) = map.get(INHERIT_KEY) {
        let Some(items) = chain.as_array() else {
            return Err(DecodeAnomaly::BadSentinel {
                name: owner.to_string(),
                key: INHERIT_KEY,
                found: kind_of(chain),
            });
        };
        return Ok(ClassElement::Inherit(
            items.iter().map(display_string).collect(),
        ));
    }

    if let Some(size) = map.get(SIZE_KEY) {
        return match size.as_u64() {
            Some(size) => Ok(ClassElement::Size(size)),
            None => Err(DecodeAnomaly::BadSentinel {
                name: owner.to_string(),
                key: SIZE_KEY,
                found: kind_of(size),
            }),
        };
    }

    let (name, details) = split_entry(element)?;
    Ok(ClassElement::Member(decode_member(name, details)))
}

/// Member detail is `[[typeName, ...], byteOffset, byteSize?]`
fn decode_member(name: String, details: &Value) -> MemberDescriptor {
    let parts = details.as_array().map(Vec::as_slice).unwrap_or_default();
    MemberDescriptor {
        byte_offset: position_of(&name, "offset", parts.get(1)),
        name,
        type_name: parts.first().and_then(type_name_of),
        byte_size: parts.get(2).and_then(Value::as_u64),
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Enum detail is `[[values, underlyingType]]`
fn decode_enum(name: String, detail: &Value) -> EnumRecord {
    let inner = detail
        .as_array()
        .and_then(|d| d.first())
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let underlying_type = inner
        .get(1)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let (shape, values) = match inner.first() {
        Some(Value::Object(map)) => (
            ValueShape::Map,
            map.iter()
                .map(|(label, value)| EnumValue {
                    label: label.clone(),
                    value: display_string(value),
                })
                .collect(),
        ),
        Some(Value::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item.as_object().and_then(|m| m.iter().next()) {
                    Some((label, value)) => values.push(EnumValue {
                        label: label.clone(),
                        value: display_string(value),
                    }),
                    None => warn_anomaly(DecodeAnomaly::ElementNotObject {
                        name: name.clone(),
                        found: kind_of(item),
                    }),
                }
            }
            (ValueShape::List, values)
        }
        _ => (ValueShape::List, Vec::new()),
    };

    EnumRecord {
        name,
        underlying_type,
        shape,
        values,
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Function group detail is `[{ fnName: [[ret], params, address?], ... }, ...]`
fn decode_functions(name: String, detail: &Value) -> FunctionGroup {
    let mut group = FunctionGroup {
        name,
        functions: Vec::new(),
    };

    let Some(objects) = detail.as_array() else {
        warn_anomaly(DecodeAnomaly::DetailNotArray {
            name: group.name.clone(),
            found: kind_of(detail),
        });
        return group;
    };

    for object in objects {
        let Some(map) = object.as_object() else {
            warn_anomaly(DecodeAnomaly::ElementNotObject {
                name: group.name.clone(),
                found: kind_of(object),
            });
            continue;
        };
        for (func_name, func_data) in map {
            group.functions.push(decode_function(func_name, func_data));
        }
    }
    group
}

fn decode_function(name: &str, data: &Value) -> Function {
    let parts = data.as_array().map(Vec::as_slice).unwrap_or_default();
    let parameters = parts
        .get(1)
        .and_then(Value::as_array)
        .map(|params| params.iter().map(decode_parameter).collect())
        .unwrap_or_default();

    Function {
        name: name.to_string(),
        return_type: parts.first().and_then(type_name_of),
        parameters,
        address: position_of(name, "address", parts.get(2)).filter(|a| *a != 0),
    }
}

/// Offset or address: absent and `null` are `None`, whole numbers (integer or
/// float, negatives included) are kept, anything else is an anomaly
fn position_of(owner: &str, field: &'static str, value: Option<&Value>) -> Option<i64> {
    let value = value.filter(|v| !v.is_null())?;
    let position = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    });

    if position.is_none() {
        warn_anomaly(DecodeAnomaly::BadPosition {
            name: owner.to_string(),
            field,
            value: value.to_string(),
        });
    }
    position
}

/// Parameter is `[[typeName, ...], unused, paramName]`
fn decode_parameter(param: &Value) -> Parameter {
    let parts = param.as_array().map(Vec::as_slice).unwrap_or_default();
    Parameter {
        type_name: parts.first().and_then(type_name_of),
        name: parts
            .get(2)
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .map(String::from),
    }
}

// ============================================================================
// Offsets
// ============================================================================

fn decode_offset(name: String, value: &Value) -> OffsetEntry {
    let value = match value {
        Value::Number(n) => OffsetValue::Number(n.clone()),
        Value::String(s) => OffsetValue::Text(s.clone()),
        Value::Null => {
            warn!(offset = %name, "offset has no value");
            OffsetValue::Text(String::new())
        }
        other => OffsetValue::Text(other.to_string()),
    };
    OffsetEntry::new(name, value)
}

// ============================================================================
// Helpers
// ============================================================================

/// Type names are nested one level (`[typeName, ...]`); a bare string is accepted too
fn type_name_of(value: &Value) -> Option<String> {
    let name = match value {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    };
    name.filter(|s| !s.is_empty()).map(String::from)
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn warn_anomaly(anomaly: DecodeAnomaly) {
    warn!("{}", anomaly);
}
