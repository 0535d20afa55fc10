//! Line-by-line rewriting of a mesh file

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::obj::{has_vertex_marker, rewrite_line};
use crate::pipeline::VertexPipeline;

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines written
    pub lines: usize,
    /// Vertex records transformed
    pub vertices: usize,
}

/// Strips one trailing `\n`, keeping any `\r` so pass-through lines stay verbatim
fn strip_newline(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// Rewrites every line of `reader` into `writer`, in order
///
/// Each output line ends with a single `\n`. Lines without a vertex marker
/// are copied as raw bytes, so they need not be UTF-8. The first failing
/// line aborts the run with its line number attached.
pub fn rewrite<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    pipeline: &mut VertexPipeline,
) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let number = stats.lines + 1;
        let line = strip_newline(&buf);

        if has_vertex_marker(line) {
            let text = std::str::from_utf8(line).map_err(|_| {
                let content = String::from_utf8_lossy(line);
                Error::Parse {
                    token: content.to_string(),
                }
                .at_line(number, &content)
            })?;
            let (out, is_vertex) =
                rewrite_line(text, pipeline).map_err(|e| e.at_line(number, text))?;
            writer.write_all(out.as_bytes())?;
            if is_vertex {
                stats.vertices += 1;
            }
        } else {
            writer.write_all(line)?;
        }
        writer.write_all(b"\n")?;

        stats.lines = number;
    }

    writer.flush()?;
    Ok(stats)
}

/// Runs a full conversion described by `config`
///
/// Output goes to a temporary file next to the target and is only moved
/// into place once every line has been rewritten.
pub fn rewrite_file(config: &Config) -> Result<RewriteStats> {
    let mut pipeline = VertexPipeline::new(config.source.clone(), config.target.clone())?;

    let source = File::open(&config.source_file)?;
    let target_dir = match config.target_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let staging = NamedTempFile::new_in(target_dir)?;

    let mut writer = BufWriter::new(staging);
    let stats = rewrite(BufReader::new(source), &mut writer, &mut pipeline)?;
    let staging = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;

    staging
        .persist(&config.target_file)
        .map_err(|e| Error::Io(e.error))?;

    debug!(lines = stats.lines, vertices = stats.vertices, "rewrite finished");
    info!(
        target = %config.target_file.display(),
        vertices = stats.vertices,
        "Wrote converted mesh"
    );
    Ok(stats)
}
