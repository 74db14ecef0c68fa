//! Output sinks: Graphviz documents on disk and the optional PNG pass.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use vpcmap_error::{Error, Result};

/// Turn a VPC title into a safe file stem: spaces become hyphens, path
/// separators become underscores, dots are dropped.
pub fn file_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '\\' | '/' => Some('_'),
            '.' => None,
            other => Some(other),
        })
        .collect()
}

/// Write one DOT document under `dir` as `{title}.gv`.
pub fn write_graphviz(dir: &Path, title: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        Error::from(e)
            .with_operation("output::write_graphviz")
            .with_context("dir", dir.display().to_string())
    })?;

    let path = dir.join(format!("{}.gv", file_title(title)));
    fs::write(&path, text).map_err(|e| {
        Error::from(e)
            .with_operation("output::write_graphviz")
            .with_context("path", path.display().to_string())
    })?;

    info!(path = %path.display(), "graphviz written");
    Ok(path)
}

/// Rasterize a written `.gv` file with the external `dot` binary. The
/// process runs inside the document's directory so relative icon paths in
/// the DOT text resolve.
pub fn rasterize(path: &Path) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| Error::rasterizer_failed("graphviz path has no file name"))?;

    let mut command = Command::new("dot");
    command.args(["-Tpng", "-x", "-O", file]);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let status = command.status().map_err(|e| {
        Error::rasterizer_failed("failed to spawn dot")
            .with_context("path", path.display().to_string())
            .set_source(e)
    })?;

    if !status.success() {
        return Err(Error::rasterizer_failed(format!("dot exited with {status}"))
            .with_context("path", path.display().to_string()));
    }

    info!(path = %path.display(), "png rendered");
    Ok(())
}
