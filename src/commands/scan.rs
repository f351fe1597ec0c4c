// src/commands/scan.rs
//! `scan` — tagged fragments out of a local HTML file, no sign-in.
//! Useful for eyeballing what `todos` would extract from a saved page.

use crate::error::AppError;
use crate::tags::find_tagged_fragments;
use std::fs;
use std::path::Path;

pub fn run(file: &Path, tag: &str) -> Result<(), AppError> {
    let html = fs::read_to_string(file)?;
    let fragments = find_tagged_fragments(&html, tag);

    for (n, fragment) in fragments.iter().enumerate() {
        println!("{:3}\t{}", n, fragment);
    }
    println!(
        "\n{} '{}' fragment(s) in {}",
        fragments.len(),
        tag,
        file.display()
    );

    Ok(())
}
