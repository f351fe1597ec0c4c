// src/commands/notebooks.rs
//! `notebooks` — every notebook, with the collection total.

use crate::api::{fetch_all_items, GraphClient, OneNoteRepository, QueryOptions};
use crate::error::AppError;

pub async fn run(
    client: &GraphClient,
    top: Option<u32>,
    filter: Option<String>,
) -> Result<(), AppError> {
    let mut options = QueryOptions::new().with_count();
    if let Some(top) = top {
        options = options.top(top);
    }
    if let Some(filter) = filter {
        options = options.filter(filter);
    }

    let collected = fetch_all_items(
        options.to_pairs(),
        |query| async move { client.list_notebooks(&query).await },
        None,
    )
    .await?;

    if let Some(total) = collected.total {
        println!("total notebooks = {}", total);
    }
    println!("fetched notebooks = {}\n", collected.items.len());

    for (n, notebook) in collected.items.iter().enumerate() {
        let marker = if notebook.is_default { " (default)" } else { "" };
        println!("notebook[{}]\t{}{}", n, notebook.display_name, marker);
    }

    Ok(())
}
