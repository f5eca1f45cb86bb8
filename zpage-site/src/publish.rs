//! Build-time page publishing
//!
//! Renders the page once and writes it to a fixed path. The document goes to
//! a uniquely named staging file in the output directory, which is renamed
//! into place only after the write succeeds. A staging file that is not
//! persisted is removed when dropped, so a failed render or write never
//! leaves a partial page or stray temp file behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;
use zpage_common::{PageRenderer, ProjectId, RecordProvider, Result};

/// Render project `id` and write the document to `output`
pub async fn publish_page(
    provider: &dyn RecordProvider,
    renderer: &PageRenderer,
    id: ProjectId,
    output: &Path,
) -> Result<PathBuf> {
    let html = renderer.render_for(provider, id).await?;

    let dir = output_dir(output);
    fs::create_dir_all(dir)?;

    let mut staging = tempfile::Builder::new()
        .prefix(".zpage-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    write_staged(&mut staging, html.as_bytes())?;
    staging.persist(output).map_err(|e| e.error)?;

    info!("Wrote {} ({} bytes)", output.display(), html.len());
    Ok(output.to_path_buf())
}

fn write_staged(staging: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    staging.write_all(bytes)?;
    staging.as_file().sync_all()
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
