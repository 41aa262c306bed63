//! Normalized record types produced by the decoder.
//!
//! Every positional detail of the raw dump format is resolved into a named
//! field here; nothing downstream of the decoder looks at raw JSON arrays.

use serde::{Deserialize, Serialize};

/// Key of the sentinel element carrying a class's inheritance list
pub const INHERIT_KEY: &str = "__InheritInfo";

/// Key of the sentinel element carrying a class's byte size
pub const SIZE_KEY: &str = "__MDKClassSize";

/// A decoded catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// Class or struct layout (both categories share the same shape)
    Class(ClassRecord),
    Enum(EnumRecord),
    /// All functions declared by one owning class
    Functions(FunctionGroup),
    Offset(OffsetEntry),
}

impl Record {
    /// Identifying name of the record
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Enum(e) => &e.name,
            Self::Functions(g) => &g.name,
            Self::Offset(o) => &o.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    /// Byte size from the size sentinel, 0 when the dump omits it
    pub size_bytes: u64,
    /// Ancestors exactly as listed by the dump
    pub inheritance_chain: Vec<String>,
    pub members: Vec<MemberDescriptor>,
}

/// A property or field of a class/struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub type_name: Option<String>,
    /// `None` means the dump gave no offset, which is not the same as 0
    pub byte_offset: Option<i64>,
    pub byte_size: Option<u64>,
}

/// How the enum's value collection was laid out in the dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    /// Array of single-key objects
    List,
    /// Plain label→value object
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumRecord {
    pub name: String,
    pub underlying_type: String,
    pub shape: ValueShape,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub label: String,
    /// Literal as displayed (numbers in decimal, strings verbatim)
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionGroup {
    /// Owning class
    pub name: String,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
    pub address: Option<i64>,
}

impl Function {
    /// Return type for display, `void` when the dump has none
    pub fn return_type_or_default(&self) -> &str {
        self.return_type.as_deref().unwrap_or("void")
    }

    /// C-like signature: `ret name(type name, ...)`
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_or_default(), p.signature_name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}({})", self.return_type_or_default(), self.name, params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub type_name: Option<String>,
    pub name: Option<String>,
}

impl Parameter {
    pub fn type_or_default(&self) -> &str {
        self.type_name.as_deref().unwrap_or("unknown")
    }

    /// Name used when synthesizing a signature
    pub fn signature_name(&self) -> &str {
        self.name.as_deref().unwrap_or("param")
    }

    /// Name used in a parameter listing
    pub fn listing_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// Raw value of a named offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    Number(serde_json::Number),
    Text(String),
}

impl OffsetValue {
    /// `0x` followed by the uppercase base-16 form of any number
    /// (`0x-10`, `0x1.8`); text is shown as-is
    pub fn hex_display(&self) -> String {
        match self {
            Self::Number(n) => format!("0x{}", number_hex_digits(n).to_uppercase()),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Fraction digits emitted for non-integral numbers (52 mantissa bits)
const MAX_FRACTION_DIGITS: usize = 13;

/// Lowercase base-16 digits with a leading `-` for negatives
pub fn hex_digits(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{:x}", value)
    }
}

/// Lowercase base-16 form of a JSON number, fraction included
pub fn number_hex_digits(n: &serde_json::Number) -> String {
    if let Some(v) = n.as_u64() {
        format!("{:x}", v)
    } else if let Some(v) = n.as_i64() {
        hex_digits(v)
    } else {
        float_hex_digits(n.as_f64().unwrap_or_default())
    }
}

fn float_hex_digits(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let whole = abs.trunc();
    let mut out = format!("{}{:x}", sign, whole as u64);

    let mut frac = abs - whole;
    if frac > 0.0 {
        out.push('.');
        for _ in 0..MAX_FRACTION_DIGITS {
            frac *= 16.0;
            let digit = frac.trunc();
            out.push(char::from_digit(digit as u32, 16).unwrap_or('0'));
            frac -= digit;
            if frac <= 0.0 {
                break;
            }
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetEntry {
    pub name: String,
    pub value: OffsetValue,
    pub hex_display: String,
}

impl OffsetEntry {
    pub fn new(name: String, value: OffsetValue) -> Self {
        let hex_display = value.hex_display();
        Self {
            name,
            value,
            hex_display,
        }
    }
}
