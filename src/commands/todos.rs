// src/commands/todos.rs
//! `todos` — walk pages, scan their HTML, report tagged fragments
//! grouped by page.

use crate::api::GraphClient;
use crate::error::AppError;
use crate::todo::{TodoFinder, TodoReport};

pub async fn run(
    client: &GraphClient,
    notebook: Option<&str>,
    tag: &str,
) -> Result<(), AppError> {
    let finder = TodoFinder::new(client).with_tag(tag);
    let report = finder.find(notebook).await?;
    print_report(&report, tag);
    Ok(())
}

/// One `----- <count> Notebook/Section/Title` header per page, then the
/// numbered fragments.
fn print_report(report: &TodoReport, tag: &str) {
    for page in &report.pages {
        println!("----- {:3} {}", page.fragments.len(), page.location());
        for (n, fragment) in page.fragments.iter().enumerate() {
            println!("{:3}\t{}", n, fragment);
        }
        println!();
    }

    println!(
        "{} '{}' fragment(s) on {} of {} page(s) scanned",
        report.fragment_count(),
        tag,
        report.pages.len(),
        report.pages_scanned
    );
}
