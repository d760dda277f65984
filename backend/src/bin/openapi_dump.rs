//! Print the OpenAPI document as pretty JSON for client generators.

use color_eyre::eyre::Result;
use recipe_notebook::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
