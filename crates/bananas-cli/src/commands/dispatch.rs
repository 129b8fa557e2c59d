//! Dispatch command: answers one dashboard data request.

use std::path::Path;

use anyhow::{Context, Result};
use bananas_core::{Dispatcher, JsonDirectory};

/// Handle a request against a directory snapshot and print the response
pub fn run(directory: &Path, request: &str) -> Result<()> {
    let directory = JsonDirectory::load(directory)
        .with_context(|| format!("Failed to load directory {}", directory.display()))?;
    let response = Dispatcher::new(directory).handle(request);
    println!("{}", response.to_json()?);
    Ok(())
}
