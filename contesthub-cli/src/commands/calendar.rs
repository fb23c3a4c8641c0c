use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contesthub_core::ContestId;
use contesthub_core::calendar::{self, CalendarArtifact, IcsFile};
use contesthub_core::config::ContestHubConfig;
use owo_colors::OwoColorize;

use crate::source::{load_snapshot, snapshot_path};

pub fn run(
    config: &ContestHubConfig,
    file: Option<&Path>,
    id: &str,
    provider: &str,
    print: bool,
) -> Result<()> {
    let path = snapshot_path(file, config);
    let snapshot = load_snapshot(&path)?;
    let id = ContestId::from(id);

    let Some(contest) = snapshot.contests.iter().find(|c| c.id == id) else {
        anyhow::bail!("Contest '{}' not found in {}", id, path.display());
    };

    match calendar::generate_for(contest, provider)? {
        CalendarArtifact::Url(url) if print => println!("{}", url),
        CalendarArtifact::Url(url) => {
            open::that(url.as_str())
                .with_context(|| format!("Could not open browser for {}", url))?;
            println!("{} {}", "Opened".green(), contest.display_name());
        }
        CalendarArtifact::File(ics) if print => print!("{}", ics.content),
        CalendarArtifact::File(ics) => {
            let path = save_ics(&config.download_path(), &ics)?;
            println!("{} {}", "Saved".green(), path.display());
        }
    }

    Ok(())
}

/// Write `ics` into `dir`, keeping its generated name apart from path separators.
pub fn save_ics(dir: &Path, ics: &IcsFile) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;

    let filename = ics.filename.replace(['/', '\\'], "-");
    let path = dir.join(filename);

    std::fs::write(&path, &ics.content)
        .with_context(|| format!("Could not write {}", path.display()))?;

    Ok(path)
}
