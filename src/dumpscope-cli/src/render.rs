//! Plain-text rendering of games, record lists and detail views

use dumpscope::detail::{ClassView, EnumView, FunctionGroupView};
use dumpscope::{Category, GameEntry, MatchResult, NoticeLevel, Notifier, Record, ViewModel};
use std::fmt::Write;

/// Prints notices to stderr so they never mix with command output
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let icon = match level {
            NoticeLevel::Info => "⏳",
            NoticeLevel::Success => "✅",
            NoticeLevel::Error => "❌",
        };
        eprintln!("{} {}", icon, message);
    }
}

pub fn format_games(games: &[&GameEntry]) -> String {
    if games.is_empty() {
        return "No games found\n".to_string();
    }

    let mut out = String::new();
    for game in games {
        let _ = writeln!(out, "{} {}", game.icon(), game.display_name);
    }
    let _ = writeln!(out, "\n{} games", games.len());
    out
}

/// One list line: offsets show their value, everything else its category
pub fn format_record_line(
    record: &Record,
    category: Category,
    result: Option<&MatchResult>,
) -> String {
    let mut line = match record {
        Record::Offset(o) => format!("{:<40} {}", o.name, o.hex_display),
        other => format!("{:<40} {}", other.name(), category),
    };
    if let Some(result) = result.filter(|r| !r.reasons.is_empty()) {
        let _ = write!(line, "  ✓ {}", result);
    }
    line
}

pub fn format_empty(category: Category) -> String {
    format!("No {} data available", category)
}

pub fn format_view(view: &ViewModel) -> String {
    match view {
        ViewModel::Class(c) => format_class(c),
        ViewModel::Enum(e) => format_enum(e),
        ViewModel::Functions(g) => format_functions(g),
        ViewModel::Offset(o) => format!("{}\n  [Offset] {}\n", o.name, o.display),
    }
}

fn format_class(view: &ClassView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.name);
    let _ = writeln!(
        out,
        "  [{}] [Size: {} bytes] [{} properties]",
        view.kind, view.size_bytes, view.property_count
    );

    if let Some(chain) = &view.inheritance {
        let _ = writeln!(out, "\nInheritance Chain\n  {}", chain.render());
    }

    if !view.properties.is_empty() {
        let _ = writeln!(out, "\nProperties ({})", view.properties.len());
        for prop in &view.properties {
            let _ = writeln!(out, "  {:<32} {}", prop.name, prop.type_name);
            if let Some(location) = &prop.location {
                let _ = writeln!(out, "    {}", location);
            }
        }
    }
    out
}

fn format_enum(view: &EnumView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.name);
    let _ = writeln!(
        out,
        "  [Enum] [Type: {}] [{} values]",
        view.underlying_type, view.value_count
    );
    let _ = writeln!(out, "\nValues");
    for (label, value) in &view.values {
        let _ = writeln!(out, "  {:<40} {}", label, value);
    }
    out
}

fn format_functions(view: &FunctionGroupView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.name);
    let _ = writeln!(
        out,
        "  [Class Functions] [{} functions]",
        view.function_count
    );

    for func in &view.functions {
        let _ = writeln!(out, "\n⚙ {}", func.name);
        let _ = writeln!(out, "  {}", func.signature);
        if !func.parameters.is_empty() {
            let _ = writeln!(out, "  Parameters ({})", func.parameters.len());
            for param in &func.parameters {
                let _ = writeln!(out, "    • {}", param);
            }
        }
        if let Some(address) = &func.address_hex {
            let _ = writeln!(out, "  Address {}", address);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumpscope::{decode, project};
    use serde_json::json;

    #[test]
    fn test_format_class_view() {
        let raw = json!({
            "data": [{
                "APawn": [
                    { "__InheritInfo": ["AActor", "UObject"] },
                    { "__MDKClassSize": 1024 },
                    { "Controller": [["AController*"], 600, 8] },
                    { "Flags": [["uint8"]] }
                ]
            }]
        });
        let records = decode(Category::Classes, Some(&raw));
        let text = format_view(&project(&records[0], Category::Classes));

        assert!(text.contains("[Class] [Size: 1024 bytes] [2 properties]"));
        assert!(text.contains("AActor → UObject"));
        assert!(text.contains("Offset: 0x258 | Size: 8 bytes"));
        assert_eq!(text.matches("Offset:").count(), 1);
    }

    #[test]
    fn test_format_functions_view() {
        let raw = json!({
            "data": [{ "APawn": [{ "Jump": [["bool"], [[["float"], null]], 4096] }] }]
        });
        let records = decode(Category::Functions, Some(&raw));
        let text = format_view(&project(&records[0], Category::Functions));

        assert!(text.contains("bool Jump(float param)"));
        assert!(text.contains("• float unnamed"));
        assert!(text.contains("Address 0x1000"));
    }

    #[test]
    fn test_format_record_line() {
        let raw = json!({ "data": [["GWorld", 305419896]] });
        let records = decode(Category::Offsets, Some(&raw));
        let line = format_record_line(&records[0], Category::Offsets, None);
        assert!(line.starts_with("GWorld"));
        assert!(line.ends_with("0x12345678"));
        assert_eq!(format_empty(Category::Enums), "No enums data available");
    }

    #[test]
    fn test_format_games() {
        let games = [GameEntry::new("Apex%20Legends")];
        let refs: Vec<&GameEntry> = games.iter().collect();
        let text = format_games(&refs);
        assert!(text.contains("🏆 Apex Legends"));
        assert!(text.contains("1 games"));
        assert_eq!(format_games(&[]), "No games found\n");
    }
}
