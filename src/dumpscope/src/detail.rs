//! Detail projector: one record expanded into a display-ready view model.

use serde::Serialize;

use crate::category::Category;
use crate::record::{
    hex_digits, ClassRecord, EnumRecord, FunctionGroup, OffsetEntry, Record, ValueShape,
};

/// Separator drawn between consecutive inheritance chain entries
pub const CHAIN_SEPARATOR: &str = "→";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    Class(ClassView),
    Enum(EnumView),
    Functions(FunctionGroupView),
    Offset(OffsetView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassView {
    pub name: String,
    /// "Class" or "Struct"
    pub kind: &'static str,
    pub size_bytes: u64,
    pub property_count: usize,
    /// Absent when the dump lists no ancestors
    pub inheritance: Option<InheritanceView>,
    pub properties: Vec<PropertyView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritanceView {
    pub entries: Vec<String>,
}

impl InheritanceView {
    /// Left-to-right chain: `A → B → C`
    pub fn render(&self) -> String {
        self.entries.join(&format!(" {} ", CHAIN_SEPARATOR))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyView {
    pub name: String,
    pub type_name: String,
    /// Only present when the member has an offset (0 included)
    pub location: Option<MemberLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberLocation {
    pub offset_hex: String,
    pub size_bytes: Option<u64>,
}

impl std::fmt::Display for MemberLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Offset: {}", self.offset_hex)?;
        if let Some(size) = self.size_bytes {
            write!(f, " | Size: {} bytes", size)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumView {
    pub name: String,
    pub underlying_type: String,
    pub shape: ValueShape,
    pub value_count: usize,
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionGroupView {
    pub name: String,
    pub function_count: usize,
    pub functions: Vec<FunctionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionView {
    pub name: String,
    pub signature: String,
    /// `type name` per parameter, unnamed parameters as `unnamed`
    pub parameters: Vec<String>,
    pub address_hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetView {
    pub name: String,
    pub display: String,
}

/// Expand a record for display. `category` distinguishes classes from structs.
pub fn project(record: &Record, category: Category) -> ViewModel {
    match record {
        Record::Class(c) => ViewModel::Class(project_class(c, category)),
        Record::Enum(e) => ViewModel::Enum(project_enum(e)),
        Record::Functions(g) => ViewModel::Functions(project_functions(g)),
        Record::Offset(o) => ViewModel::Offset(project_offset(o)),
    }
}

fn project_class(record: &ClassRecord, category: Category) -> ClassView {
    let kind = match category {
        Category::Structs => Category::Structs.label(),
        _ => Category::Classes.label(),
    };

    let properties: Vec<PropertyView> = record
        .members
        .iter()
        .map(|m| PropertyView {
            name: m.name.clone(),
            type_name: m.type_name.clone().unwrap_or_else(|| "Unknown".to_string()),
            location: m.byte_offset.map(|offset| MemberLocation {
                offset_hex: upper_hex(offset),
                size_bytes: m.byte_size,
            }),
        })
        .collect();

    let inheritance = (!record.inheritance_chain.is_empty()).then(|| InheritanceView {
        entries: record.inheritance_chain.clone(),
    });

    ClassView {
        name: record.name.clone(),
        kind,
        size_bytes: record.size_bytes,
        property_count: properties.len(),
        inheritance,
        properties,
    }
}

fn project_enum(record: &EnumRecord) -> EnumView {
    let values: Vec<(String, String)> = record
        .values
        .iter()
        .map(|v| (v.label.clone(), v.value.clone()))
        .collect();

    EnumView {
        name: record.name.clone(),
        underlying_type: record.underlying_type.clone(),
        shape: record.shape,
        value_count: values.len(),
        values,
    }
}

fn project_functions(group: &FunctionGroup) -> FunctionGroupView {
    let functions: Vec<FunctionView> = group
        .functions
        .iter()
        .map(|f| FunctionView {
            name: f.name.clone(),
            signature: f.signature(),
            parameters: f
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.type_or_default(), p.listing_name()))
                .collect(),
            address_hex: f.address.map(upper_hex),
        })
        .collect();

    FunctionGroupView {
        name: group.name.clone(),
        function_count: functions.len(),
        functions,
    }
}

fn project_offset(entry: &OffsetEntry) -> OffsetView {
    OffsetView {
        name: entry.name.clone(),
        display: entry.hex_display.clone(),
    }
}

fn upper_hex(value: i64) -> String {
    format!("0x{}", hex_digits(value).to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use serde_json::json;

    fn class_view(view: ViewModel) -> ClassView {
        match view {
            ViewModel::Class(c) => c,
            other => panic!("expected class view, got {:?}", other),
        }
    }

    #[test]
    fn test_class_projection() {
        let raw = json!({
            "data": [{
                "FHitResult": [
                    { "__InheritInfo": ["FBase", "FRoot"] },
                    { "__MDKClassSize": 136 },
                    { "Time": [["float"], 0, 4] },
                    { "Item": [["int32"], 255, 4] },
                    { "Unplaced": [["bool"]] },
                    { "Opaque": 7 }
                ]
            }]
        });
        let records = decode(Category::Structs, Some(&raw));
        let view = class_view(project(&records[0], Category::Structs));

        assert_eq!(view.kind, "Struct");
        assert_eq!(view.size_bytes, 136);
        assert_eq!(view.property_count, 4);
        assert_eq!(
            view.inheritance.as_ref().map(InheritanceView::render),
            Some("FBase → FRoot".to_string())
        );

        let time = &view.properties[0];
        assert_eq!(
            time.location.as_ref().map(|l| l.to_string()),
            Some("Offset: 0x0 | Size: 4 bytes".to_string())
        );
        assert_eq!(
            view.properties[1].location.as_ref().map(|l| l.offset_hex.as_str()),
            Some("0xFF")
        );
        assert_eq!(view.properties[2].location, None);
        assert_eq!(view.properties[3].type_name, "Unknown");
    }

    #[test]
    fn test_member_location_edge_values() {
        let raw = json!({
            "data": [{
                "AThing": [
                    { "Back": [["int"], -8, 4] },
                    { "Whole": [["int"], 16.0] }
                ]
            }]
        });
        let records = decode(Category::Classes, Some(&raw));
        let view = class_view(project(&records[0], Category::Classes));

        assert_eq!(
            view.properties[0].location.as_ref().map(|l| l.to_string()),
            Some("Offset: 0x-8 | Size: 4 bytes".to_string())
        );
        assert_eq!(
            view.properties[1].location.as_ref().map(|l| l.to_string()),
            Some("Offset: 0x10".to_string())
        );
    }

    #[test]
    fn test_class_without_chain() {
        let raw = json!({ "data": [{ "UObject": [] }] });
        let records = decode(Category::Classes, Some(&raw));
        let view = class_view(project(&records[0], Category::Classes));
        assert_eq!(view.kind, "Class");
        assert!(view.inheritance.is_none());
        assert_eq!(view.property_count, 0);
    }

    #[test]
    fn test_enum_projection_counts_both_shapes() {
        let raw = json!({
            "data": [
                { "EList": [[[{ "A": 0 }, { "B": 1 }], "uint8"]] },
                { "EMap": [[{ "X": 0, "Y": 1, "Z": 2 }, "int32"]] }
            ]
        });
        let records = decode(Category::Enums, Some(&raw));

        let ViewModel::Enum(list) = project(&records[0], Category::Enums) else {
            panic!("expected enum view");
        };
        assert_eq!(list.shape, ValueShape::List);
        assert_eq!(list.value_count, 2);

        let ViewModel::Enum(map) = project(&records[1], Category::Enums) else {
            panic!("expected enum view");
        };
        assert_eq!(map.shape, ValueShape::Map);
        assert_eq!(map.value_count, 3);
        assert_eq!(map.underlying_type, "int32");
        assert_eq!(map.values[2], ("Z".to_string(), "2".to_string()));
    }

    #[test]
    fn test_function_projection() {
        let raw = json!({
            "data": [{
                "APawn": [{
                    "SetName": [[], [[["FString"], null, "NewName"], [["int32"], null]], 305419896]
                }]
            }]
        });
        let records = decode(Category::Functions, Some(&raw));
        let ViewModel::Functions(group) = project(&records[0], Category::Functions) else {
            panic!("expected function view");
        };

        assert_eq!(group.function_count, 1);
        let f = &group.functions[0];
        assert_eq!(f.signature, "void SetName(FString NewName, int32 param)");
        assert_eq!(f.parameters, vec!["FString NewName", "int32 unnamed"]);
        assert_eq!(f.address_hex.as_deref(), Some("0x12345678"));
    }

    #[test]
    fn test_offset_projection() {
        let raw = json!({ "data": [["Tag", "v1.0"]] });
        let records = decode(Category::Offsets, Some(&raw));
        assert_eq!(
            project(&records[0], Category::Offsets),
            ViewModel::Offset(OffsetView {
                name: "Tag".into(),
                display: "v1.0".into(),
            })
        );
    }

    #[test]
    fn test_projection_is_idempotent() {
        let raw = json!({
            "data": [{ "AActor": [{ "__MDKClassSize": 8 }, { "Root": [["USceneComponent*"], 0, 8] }] }]
        });
        let records = decode(Category::Classes, Some(&raw));
        let first = project(&records[0], Category::Classes);
        let second = project(&records[0], Category::Classes);
        assert_eq!(first, second);
    }
}
