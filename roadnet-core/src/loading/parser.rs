//! Readers for the tab separated map tables

use std::fmt::Display;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;
use log::debug;

use super::raw_types::{FileNode, FileRoad};
use crate::Error;
use crate::model::{NodeRecord, RoadRecord, SegmentRecord};

/// Fixed columns of a segment row; coordinates follow
const SEGMENT_COLUMNS: usize = 4;

fn tab_reader(path: &Path, has_headers: bool) -> Result<csv::Reader<File>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

fn malformed(path: &Path, line: Option<u64>, detail: impl Display) -> Error {
    match line {
        Some(line) => Error::InvalidData(format!("{}:{line}: {detail}", path.display())),
        None => Error::InvalidData(format!("{}: {detail}", path.display())),
    }
}

fn read_error(path: &Path, error: &csv::Error) -> Error {
    malformed(path, error.position().map(csv::Position::line), error)
}

fn line_of(record: &StringRecord) -> Option<u64> {
    record.position().map(csv::Position::line)
}

/// Reads the node table, which has no header line
pub(crate) fn parse_nodes(path: &Path) -> Result<Vec<NodeRecord>, Error> {
    let mut reader = tab_reader(path, false)?;
    let mut nodes = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, &e))?;
        let row: FileNode = record
            .deserialize(None)
            .map_err(|e| malformed(path, line_of(&record), e))?;
        nodes.push(row.into());
    }

    debug!("Read {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Reads the road table, matching columns by header name
pub(crate) fn parse_roads(path: &Path) -> Result<Vec<RoadRecord>, Error> {
    let mut reader = tab_reader(path, true)?;
    let headers = reader.headers()?.clone();
    let mut roads = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, &e))?;
        let row: FileRoad = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(path, line_of(&record), e))?;
        roads.push(row.into());
    }

    debug!("Read {} roads from {}", roads.len(), path.display());
    Ok(roads)
}

/// Reads the segment table, whose rows end in a variable number of
/// `lat lon` pairs
pub(crate) fn parse_segments(path: &Path) -> Result<Vec<SegmentRecord>, Error> {
    let mut reader = tab_reader(path, true)?;
    let mut segments = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, &e))?;
        let segment =
            parse_segment(&record).map_err(|detail| malformed(path, line_of(&record), detail))?;
        segments.push(segment);
    }

    debug!("Read {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

fn field<T>(record: &StringRecord, ix: usize, name: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = record
        .get(ix)
        .ok_or_else(|| format!("missing {name} column"))?;
    raw.parse()
        .map_err(|e| format!("invalid {name} {raw:?}: {e}"))
}

fn parse_segment(record: &StringRecord) -> Result<SegmentRecord, String> {
    if record.len() < SEGMENT_COLUMNS {
        return Err(format!(
            "expected at least {SEGMENT_COLUMNS} columns, found {}",
            record.len()
        ));
    }

    let coords: Vec<f64> = record
        .iter()
        .skip(SEGMENT_COLUMNS)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|e| format!("invalid coordinate {raw:?}: {e}"))
        })
        .collect::<Result<_, _>>()?;
    if coords.len() % 2 != 0 {
        return Err(format!("odd number of coordinates ({})", coords.len()));
    }

    Ok(SegmentRecord {
        road: field(record, 0, "road id")?,
        length: field(record, 1, "length")?,
        start: field(record, 2, "start node")?,
        end: field(record, 3, "end node")?,
        coords: coords.into_iter().tuples().collect(),
    })
}
