// src/commands/sections.rs
//! `sections` — every section, shown under its notebook.

use crate::api::{fetch_all_items, GraphClient, OneNoteRepository, QueryOptions};
use crate::error::AppError;

pub async fn run(
    client: &GraphClient,
    top: Option<u32>,
    filter: Option<String>,
) -> Result<(), AppError> {
    let mut options = QueryOptions::new().with_count().expand("parentNotebook");
    if let Some(top) = top {
        options = options.top(top);
    }
    if let Some(filter) = filter {
        options = options.filter(filter);
    }

    let collected = fetch_all_items(
        options.to_pairs(),
        |query| async move { client.list_sections(&query).await },
        None,
    )
    .await?;

    if let Some(total) = collected.total {
        println!("total sections = {}", total);
    }
    println!("fetched sections = {}\n", collected.items.len());

    for (n, section) in collected.items.iter().enumerate() {
        let location = match section.parent_notebook.as_ref() {
            Some(notebook) => format!("{}/{}", notebook.display_name, section.display_name),
            None => section.display_name.clone(),
        };
        println!("section[{}]\t{}", n, location);
    }

    Ok(())
}
