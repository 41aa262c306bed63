//! Interactive browser over one game's catalog
//!
//! Plain input is a search term; lines starting with `:` are commands.

use anyhow::Result;
use dumpscope::{Category, FilterField, RepositoryBrowser, Session};
use std::io::{self, BufRead, Write};
use std::time::Instant;

use super::load_catalog;
use crate::render::{format_empty, format_record_line, format_view};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Search(String),
    Category(Category),
    /// `None` toggles the filter
    Filter(FilterField, Option<bool>),
    Filters,
    Show(String),
    List,
    Clear,
    Summary,
    Help,
    Quit,
}

fn parse_action(line: &str) -> Result<Action, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Ok(Action::Search(line.to_string()));
    };

    let (verb, rest) = match command.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (command, ""),
    };

    match verb {
        "q" | "quit" | "exit" => Ok(Action::Quit),
        "h" | "help" => Ok(Action::Help),
        "l" | "list" => Ok(Action::List),
        "clear" => Ok(Action::Clear),
        "info" => Ok(Action::Summary),
        "c" | "cat" => rest
            .parse::<Category>()
            .map(Action::Category)
            .map_err(|e| e.to_string()),
        "f" | "filter" => {
            if rest.is_empty() {
                return Ok(Action::Filters);
            }
            let (enabled, field) = if let Some(field) = rest.strip_prefix('+') {
                (Some(true), field)
            } else if let Some(field) = rest.strip_prefix('-') {
                (Some(false), field)
            } else {
                (None, rest)
            };
            Ok(Action::Filter(field.parse()?, enabled))
        }
        "s" | "show" if !rest.is_empty() => Ok(Action::Show(rest.to_string())),
        "s" | "show" => Err("Usage: :show NAME".to_string()),
        _ => Err(format!("Unknown command: :{} (try :help)", verb)),
    }
}

/// Handle `browse`
pub fn handle(browser: &dyn RepositoryBrowser, game: &str) -> Result<()> {
    let catalog = load_catalog(browser, game)?;
    let mut session = Session::open(catalog);

    print_summary(&session);
    println!("Type a search term, or :help for commands\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}> ", session.category());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => print_help(),
            Action::Summary => print_summary(&session),
            Action::Search(term) => {
                // One line is one complete edit, so skip the quiet period
                session.input(&term, Instant::now());
                session.flush();
                print_results(&session);
            }
            Action::Clear => {
                session.input("", Instant::now());
                print_results(&session);
            }
            Action::List => print_results(&session),
            Action::Category(category) => {
                session.switch_category(category);
                print_results(&session);
            }
            Action::Filters => print_filters(&session),
            Action::Filter(field, enabled) => {
                let enabled = enabled.unwrap_or(!session.filters().get(field));
                session.set_filter(field, enabled);
                print_filters(&session);
                if !session.term().trim().is_empty() {
                    print_results(&session);
                }
            }
            Action::Show(name) => match session.select(&name) {
                Some(view) => print!("{}", format_view(&view)),
                None => println!("No {} entry named {}", session.category(), name),
            },
        }
    }

    session.close();
    Ok(())
}

fn print_results(session: &Session) {
    let category = session.category();
    if session.records().is_empty() {
        println!("{}", format_empty(category));
        return;
    }

    for (record, result) in session.visible() {
        println!("{}", format_record_line(record, category, Some(result)));
    }

    let summary = session.summary();
    if !summary.is_empty() {
        println!("\n{}", summary);
    }
}

fn print_filters(session: &Session) {
    let filters = session.filters();
    let line: Vec<String> = FilterField::ALL
        .iter()
        .map(|&field| {
            let mark = if filters.get(field) { '+' } else { '-' };
            format!("{}{}", mark, field)
        })
        .collect();
    println!("Filters: {}", line.join(" "));
}

fn print_summary(session: &Session) {
    let summary = session.catalog().summary();
    println!("{} ({} files)", summary.game_name, summary.file_count);
    for (category, count) in &summary.counts {
        println!("  {:<10} {}", category.to_string(), count);
    }
}

fn print_help() {
    println!("TERM                 Search the current category");
    println!(":cat CATEGORY        Switch to classes, structs, enums, functions or offsets");
    println!(":filter [+|-]FIELD   Enable, disable or toggle name, property, offset, type");
    println!(":filter              Show active filters");
    println!(":show NAME           Show one record in detail");
    println!(":list                Repeat the current results");
    println!(":clear               Clear the search");
    println!(":info                Show the catalog summary");
    println!(":quit                Leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_action("health\n"),
            Ok(Action::Search("health".to_string()))
        );
        assert_eq!(parse_action("\n"), Ok(Action::Search(String::new())));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_action(":q"), Ok(Action::Quit));
        assert_eq!(
            parse_action(":cat enums"),
            Ok(Action::Category(Category::Enums))
        );
        assert_eq!(
            parse_action(":show APawn"),
            Ok(Action::Show("APawn".to_string()))
        );
        assert_eq!(parse_action(":filter"), Ok(Action::Filters));
    }

    #[test]
    fn test_parse_filter_signs() {
        assert_eq!(
            parse_action(":filter +type"),
            Ok(Action::Filter(FilterField::Type, Some(true)))
        );
        assert_eq!(
            parse_action(":filter -name"),
            Ok(Action::Filter(FilterField::Name, Some(false)))
        );
        assert_eq!(
            parse_action(":f offset"),
            Ok(Action::Filter(FilterField::Offset, None))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_action(":cat widgets").is_err());
        assert!(parse_action(":filter +colour").is_err());
        assert!(parse_action(":show").is_err());
        assert!(parse_action(":bogus").is_err());
    }
}
