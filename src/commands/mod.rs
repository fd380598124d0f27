pub mod check;
pub mod format;
pub mod practical;
pub mod report;
pub mod take;

use anyhow::{Context, Result};
use practicum::{Config, JsonRepository, MemoryRepository, Repository};
use tracing::info;

/// Demo mode gets a fresh seeded course on every run; otherwise the JSON
/// data file, created on first write.
pub fn open_repository(config: &Config) -> Result<Box<dyn Repository>> {
    if config.demo_mode {
        info!("using the demo course, nothing is saved");
        return Ok(Box::new(MemoryRepository::demo()));
    }

    let repo = JsonRepository::open(&config.data_file)
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;
    Ok(Box::new(repo))
}
