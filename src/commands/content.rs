// src/commands/content.rs
//! `content` — a page's raw HTML, to stdout or a file.

use crate::api::{GraphClient, OneNoteRepository};
use crate::error::AppError;
use std::fs;
use std::path::PathBuf;

pub async fn run(
    client: &GraphClient,
    id: &str,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let content = client.get_page_content(id).await?;

    match output {
        Some(path) => {
            fs::write(&path, &content)?;
            println!("✓ Page content saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}
