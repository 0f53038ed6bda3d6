use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::plot::Scene;
use crate::chart::visibility::TraceGroup;
use crate::data::{filter, loader};
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Everything one run needs, independent of how it was parsed.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub input: PathBuf,
    pub html: PathBuf,
    pub title: String,
    pub open: bool,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load → classify → build → write. Returns the absolute output path.
///
/// Nothing is written when validation fails.
pub fn run(config: &ViewerConfig) -> Result<PathBuf> {
    let table = loader::load_file(&config.input)?;
    if table.is_empty() {
        log::warn!("No rows with a numeric time value; the chart will be empty");
    }
    log::debug!("{} rows, columns {:?}", table.len(), table.column_names());

    let channels = filter::split_roles(&table);
    if channels.is_empty() {
        return Err(ViewerError::NoChannels.into());
    }
    log::info!(
        "Channels: {} EEG, {} CM, {} ECG ({} traces)",
        channels.eeg.len(),
        channels.reference.len(),
        channels.ecg_raw_count(),
        channels.trace_count()
    );

    let scene = Scene::build(&table.time, &channels, &config.title);

    let out = absolute(&config.html)?;
    scene.write_html(&out)?;
    log::debug!(
        "ECG μV traces start hidden: {:?}",
        scene.index.indices(TraceGroup::EcgUv)
    );
    log::info!(
        "Wrote {} traces ({} initially visible) to {}",
        scene.index.len(),
        scene.initial_visibility.iter().filter(|v| **v).count(),
        out.display()
    );

    if config.open {
        open_in_browser(&out);
    }

    Ok(out)
}

/// Absolute, normalised output path. The parent directory must exist; it is
/// canonicalised so `..` and symlinks are resolved.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("resolving current directory")?
            .join(path)
    };
    let name = joined
        .file_name()
        .with_context(|| format!("output path {} has no file name", path.display()))?;
    let parent = joined.parent().unwrap_or(Path::new("/"));
    let dir = parent
        .canonicalize()
        .with_context(|| format!("resolving output directory {}", parent.display()))?;
    Ok(dir.join(name))
}

/// `file://` URI with percent-encoding, so spaces and `#` survive.
fn file_url(path: &Path) -> Result<url::Url> {
    url::Url::from_file_path(path)
        .map_err(|_| anyhow::anyhow!("cannot build a file URL for {}", path.display()))
}

fn open_in_browser(path: &Path) {
    let url = match file_url(path) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Could not open browser: {e:#}");
            return;
        }
    };
    if let Err(e) = webbrowser::open(url.as_str()) {
        log::warn!("Could not open browser: {e}. Please open {url} manually.");
    }
}
