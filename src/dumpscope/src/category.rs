//! Dump categories and their fixed file names.

use serde::{Deserialize, Serialize};

/// One of the five metadata kinds a dump is split into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classes,
    Structs,
    Enums,
    Functions,
    Offsets,
}

impl Category {
    /// All categories in sidebar order
    pub const ALL: &'static [Category] = &[
        Category::Classes,
        Category::Structs,
        Category::Enums,
        Category::Functions,
        Category::Offsets,
    ];

    /// File name the category is stored under inside a game directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Classes => "ClassesInfo.json",
            Self::Structs => "StructsInfo.json",
            Self::Enums => "EnumsInfo.json",
            Self::Functions => "FunctionsInfo.json",
            Self::Offsets => "OffsetsInfo.json",
        }
    }

    /// Reverse of [`Category::file_name`]; exact match only
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.file_name() == name)
    }

    /// Index into per-category storage
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Human label used for the record kind badge
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classes => "Class",
            Self::Structs => "Struct",
            Self::Enums => "Enum",
            Self::Functions => "Class Functions",
            Self::Offsets => "Offset",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classes => write!(f, "classes"),
            Self::Structs => write!(f, "structs"),
            Self::Enums => write!(f, "enums"),
            Self::Functions => write!(f, "functions"),
            Self::Offsets => write!(f, "offsets"),
        }
    }
}

/// Error for unknown category names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0} (expected classes, structs, enums, functions or offsets)")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classes" | "class" => Ok(Self::Classes),
            "structs" | "struct" => Ok(Self::Structs),
            "enums" | "enum" => Ok(Self::Enums),
            "functions" | "function" | "funcs" => Ok(Self::Functions),
            "offsets" | "offset" => Ok(Self::Offsets),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
