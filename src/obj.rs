//! Recognition and re-serialization of OBJ vertex records

use std::borrow::Cow;

use tracing::warn;

use crate::error::Result;
use crate::pipeline::VertexPipeline;
use crate::projection::Coordinate;

/// Marker that opens a vertex position record
pub const VERTEX_MARKER: &str = "v";

/// Whether a raw line opens with the vertex marker and a whitespace byte
pub fn has_vertex_marker(line: &[u8]) -> bool {
    line.strip_prefix(VERTEX_MARKER.as_bytes())
        .and_then(|rest| rest.first())
        .is_some_and(|b| b.is_ascii_whitespace())
}

/// Classification of one source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    /// A vertex position with its three raw fields
    Vertex([&'a str; 3]),
    /// A vertex marker followed by the wrong number of fields
    MalformedVertex(usize),
    /// Anything else
    Other,
}

impl<'a> Record<'a> {
    /// Classifies a line without its terminator
    pub fn classify(line: &'a str) -> Self {
        let Some(rest) = line.strip_prefix(VERTEX_MARKER) else {
            return Record::Other;
        };
        if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
            return Record::Other;
        }

        let mut fields = rest.split_ascii_whitespace();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(x), Some(y), Some(z), None) => Record::Vertex([x, y, z]),
            _ => Record::MalformedVertex(rest.split_ascii_whitespace().count()),
        }
    }
}

/// Serializes a vertex record, writing negative zero as `0`
pub fn format_vertex(coord: Coordinate) -> String {
    let (x, y, z) = (coord.x + 0.0, coord.y + 0.0, coord.z + 0.0);
    format!("{} {} {} {}", VERTEX_MARKER, x, y, z)
}

/// Rewrites one line, transforming it if it is a vertex record
///
/// Returns whether the line was a vertex alongside the output text.
pub fn rewrite_line<'a>(
    line: &'a str,
    pipeline: &mut VertexPipeline,
) -> Result<(Cow<'a, str>, bool)> {
    match Record::classify(line) {
        Record::Vertex(fields) => {
            let coord = pipeline.transform_fields(fields)?;
            Ok((Cow::Owned(format_vertex(coord)), true))
        }
        Record::MalformedVertex(count) => {
            warn!(
                fields = count,
                "vertex record without exactly three fields, passing through"
            );
            Ok((Cow::Borrowed(line), false))
        }
        Record::Other => Ok((Cow::Borrowed(line), false)),
    }
}
