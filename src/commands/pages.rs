// src/commands/pages.rs
//! `pages` — list pages with OData options, each under its notebook.

use crate::api::{
    fetch_all_items, filter_notebook_name, GraphClient, OneNoteRepository, QueryOptions,
};
use crate::error::AppError;

pub async fn run(
    client: &GraphClient,
    top: Option<u32>,
    orderby: Option<String>,
    filter: Option<String>,
    notebook: Option<String>,
) -> Result<(), AppError> {
    let mut options = QueryOptions::new().with_count().expand("parentNotebook");
    if let Some(top) = top {
        options = options.top(top);
    }
    if let Some(orderby) = orderby {
        options = options.order_by(orderby);
    }
    // clap rejects --filter together with --notebook.
    if let Some(filter) = filter {
        options = options.filter(filter);
    }
    if let Some(name) = notebook {
        options = options.filter(filter_notebook_name(&name));
    }

    let collected = fetch_all_items(
        options.to_pairs(),
        |query| async move { client.list_pages(&query).await },
        None,
    )
    .await?;

    if let Some(total) = collected.total {
        println!("total pages = {}", total);
    }
    println!("fetched pages = {}\n", collected.items.len());

    for (n, page) in collected.items.iter().enumerate() {
        println!("page[{:3}]\t{}", n, page.title);
        println!("\t\t{}", page.id);
        if let Some(name) = page.notebook_name() {
            println!("\t\t{}", name);
        }
    }

    Ok(())
}
