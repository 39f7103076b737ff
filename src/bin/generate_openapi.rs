//! Prints the OpenAPI document, or writes it to the path given as the
//! first argument.
//!
//!   cargo run --bin generate_openapi > openapi.json
//!   cargo run --bin generate_openapi -- openapi.json

use std::{env, fs};

use anyhow::{Context, Result};
use irrigo_service::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialise OpenAPI document")?;

    match env::args().nth(1) {
        Some(path) => {
            fs::write(&path, &json).with_context(|| format!("failed to write {path}"))?;
            eprintln!("OpenAPI document written to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
