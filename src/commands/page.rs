// src/commands/page.rs
//! `page` — one page's metadata, parents expanded.

use crate::api::{GraphClient, OneNoteRepository, QueryOptions};
use crate::error::AppError;

pub async fn run(client: &GraphClient, id: &str) -> Result<(), AppError> {
    let query = QueryOptions::new()
        .expand("parentNotebook")
        .expand("parentSection")
        .to_pairs();
    let page = client.get_page(id, &query).await?;

    println!("id={}", page.id);
    println!("title={}", page.title);
    if let Some(created) = page.created_date_time {
        println!("created={}", created);
    }
    if let Some(modified) = page.last_modified_date_time {
        println!("modified={}", modified);
    }
    if let Some(link) = page.web_href() {
        println!("link={}", link);
    }
    if let Some(notebook) = page.notebook_name() {
        println!("notebook={}", notebook);
    }
    if let Some(section) = page.section_name() {
        println!("section={}", section);
    }

    Ok(())
}
