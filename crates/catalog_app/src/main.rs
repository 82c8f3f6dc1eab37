mod prefs;
mod runner;
mod shell;

use anyhow::Result;

fn main() -> Result<()> {
    catalog_logging::initialize(catalog_logging::LogDestination::File);

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:5000".to_string());
    shell::run(&base_url)
}
