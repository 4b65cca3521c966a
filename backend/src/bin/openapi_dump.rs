//! Print the OpenAPI document as JSON.

use std::io;

use utoipa::OpenApi;
use wayfinder::doc::ApiDoc;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("failed to render OpenAPI document: {error}")))?;
    println!("{json}");
    Ok(())
}
