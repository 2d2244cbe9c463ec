use anyhow::{Context, Result};
use memmap2::Mmap;
use miette::Diagnostic;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::cli::AppContext;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Input that cannot be turned into text. Aborts the stage; nothing is written.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum SourceError
{
    #[error("cannot read {}", path.display())]
    #[diagnostic(code(projclean::source::unreadable), help("check the input path and permissions"))]
    Unreadable
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    #[diagnostic(code(projclean::source::encoding), help("re-export the list as UTF-8 text"))]
    NotUtf8
    {
        path: PathBuf,
    },
}

pub enum FileContent
{
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl AsRef<[u8]> for FileContent
{
    fn as_ref(&self) -> &[u8]
    {
        match self
        {
            FileContent::Mapped(mmap) => &mmap[..],
            FileContent::Buffered(bytes) => bytes.as_slice(),
        }
    }
}

fn unreadable(
    path: &Path,
    source: std::io::Error,
) -> SourceError
{
    SourceError::Unreadable { path: path.to_path_buf(), source }
}

/// Memory-map large files, read small ones into memory.
pub fn read_file_smart(path: &Path) -> Result<FileContent, SourceError>
{
    let metadata = std::fs::metadata(path).map_err(|e| unreadable(path, e))?;

    if metadata.len() > MMAP_THRESHOLD
    {
        let file = File::open(path).map_err(|e| unreadable(path, e))?;

        // Safety: read-only mapping; the export is not modified while we run
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| unreadable(path, e))?;

        debug!(path = %path.display(), bytes = metadata.len(), "mapped source");
        Ok(FileContent::Mapped(mmap))
    }
    else
    {
        let bytes = std::fs::read(path).map_err(|e| unreadable(path, e))?;
        Ok(FileContent::Buffered(bytes))
    }
}

/// Read a whole UTF-8 source file. A leading BOM is dropped.
pub fn read_source(path: &Path) -> Result<String, SourceError>
{
    let content = read_file_smart(path)?;
    let text = std::str::from_utf8(content.as_ref())
        .map_err(|_| SourceError::NotUtf8 { path: path.to_path_buf() })?;

    Ok(text
        .strip_prefix('\u{feff}')
        .unwrap_or(text)
        .to_string())
}

/// Log and print a source failure. The stage then ends without output.
pub fn report_source_error(
    err: SourceError,
    ctx: &AppContext,
)
{
    error!(error = %err, "input unreadable; no output written");
    if !ctx.quiet
    {
        eprintln!("{:?}", miette::Report::new(err));
    }
}

/// One item per line, each terminated by `\n`.
pub fn render_lines<S: AsRef<str>>(items: &[S]) -> String
{
    let mut out = String::with_capacity(
        items
            .iter()
            .map(|s| s.as_ref().len() + 1)
            .sum(),
    );
    for item in items
    {
        out.push_str(item.as_ref());
        out.push('\n');
    }
    out
}

/// Write a stage output, creating missing parent directories.
pub fn write_output(
    path: &Path,
    contents: &str,
) -> Result<()>
{
    if let Some(parent) = path.parent()
        && !parent
            .as_os_str()
            .is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write to {}", path.display()))
}

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf>
{
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path {}", path.display()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
