//! Record listing, search and detail commands

use anyhow::{bail, Result};
use dumpscope::{build_index, project, search as run_search, Category, RepositoryBrowser};
use dumpscope::{SearchFilters, SearchQuery};

use super::load_catalog;
use crate::render::{format_empty, format_record_line, format_view};

/// Handle `list`
pub fn list(
    browser: &dyn RepositoryBrowser,
    game: &str,
    category: Category,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(browser, game)?;
    let records = catalog.records(category);

    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else if records.is_empty() {
        println!("{}", format_empty(category));
    } else {
        for record in records {
            println!("{}", format_record_line(record, category, None));
        }
        println!("\n{} {}", records.len(), category);
    }

    catalog.close();
    Ok(())
}

/// Handle `search`
pub fn search(
    browser: &dyn RepositoryBrowser,
    game: &str,
    term: &str,
    category: Category,
    filters: SearchFilters,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(browser, game)?;
    if catalog.is_empty(category) {
        println!("{}", format_empty(category));
        catalog.close();
        return Ok(());
    }

    let index = build_index(category, catalog.records(category));
    let outcome = run_search(&index, &SearchQuery::new(term, filters));

    if json {
        let hits: Vec<_> = outcome
            .resolve(&index)
            .map(|(record, result)| {
                serde_json::json!({
                    "name": record.name(),
                    "reasons": result.reasons.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                    "more": result.more,
                })
            })
            .collect();
        let doc = serde_json::json!({
            "mode": outcome.mode,
            "summary": outcome.summary(),
            "hits": hits,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for (record, result) in outcome.resolve(&index) {
            println!("{}", format_record_line(record, category, Some(result)));
        }
        let summary = outcome.summary();
        if !summary.is_empty() {
            println!("\n{}", summary);
        }
    }

    catalog.close();
    Ok(())
}

/// Handle `show`
pub fn show(
    browser: &dyn RepositoryBrowser,
    game: &str,
    name: &str,
    category: Category,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(browser, game)?;
    let view = catalog.find(category, name).map(|r| project(r, category));
    catalog.close();
    let Some(view) = view else {
        bail!("No {} entry named {}", category, name);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_view(&view));
    }

    Ok(())
}
