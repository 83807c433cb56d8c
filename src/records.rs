//! Text records: station lists in, tree edge lists out.
//!
//! Both formats are one comma-separated record per line. Stations are
//! `name, latitude, longitude`; tree edges are `name_a, name_b, weight`.
//! Names containing commas or quotes are written quoted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::error::{Error, Result};
use crate::types::{Location, PointSet, SpanningTreeEdge};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader)
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::MalformedRecord { line, message },
    }
}

fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |pos| pos.line() as usize)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn parse_number(field: &str, what: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| Error::MalformedRecord {
        line,
        message: format!("invalid {} {:?}: {}", what, field, e),
    })
}

/// Reads stations from `reader`.
///
/// Blank lines are ignored and lines without exactly three fields are skipped
/// with a warning. A repeated name replaces the earlier station.
pub fn read_points(reader: impl Read) -> Result<PointSet> {
    let mut points = PointSet::new();
    for result in csv_reader(reader).records() {
        let record = result.map_err(csv_error)?;
        let line = line_of(&record);
        if is_blank(&record) {
            continue;
        }
        if record.len() != 3 {
            log::warn!("Invalid format on line {}: {:?}", line, record);
            continue;
        }
        let name = &record[0];
        if name.is_empty() {
            return Err(Error::MalformedRecord {
                line,
                message: "empty station name".to_string(),
            });
        }
        let location = Location::new(
            parse_number(&record[1], "latitude", line)?,
            parse_number(&record[2], "longitude", line)?,
        );
        if points.insert(name, location)?.is_some() {
            log::warn!("Station {} repeated on line {}, keeping the later one", name, line);
        }
    }
    log::info!("Read {} stations", points.len());
    Ok(points)
}

pub fn load_points(path: impl AsRef<Path>) -> Result<PointSet> {
    read_points(File::open(path.as_ref())?)
}

/// Writes one `name_a,name_b,weight` record per edge, in the given order.
pub fn write_tree(writer: impl Write, edges: &[SpanningTreeEdge]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    for edge in edges {
        let weight = edge.weight.to_string();
        csv_writer
            .write_record([edge.from.as_str(), edge.to.as_str(), weight.as_str()])
            .map_err(csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_tree(path: impl AsRef<Path>, edges: &[SpanningTreeEdge]) -> Result<()> {
    write_tree(File::create(path.as_ref())?, edges)?;
    log::info!("Spanning tree written to {}", path.as_ref().display());
    Ok(())
}

/// Parses the output of [`write_tree`] back into edges.
pub fn read_tree(reader: impl Read) -> Result<Vec<SpanningTreeEdge>> {
    let mut edges = Vec::new();
    for result in csv_reader(reader).records() {
        let record = result.map_err(csv_error)?;
        let line = line_of(&record);
        if is_blank(&record) {
            continue;
        }
        if record.len() != 3 {
            return Err(Error::MalformedRecord {
                line,
                message: format!("expected 3 fields, found {}", record.len()),
            });
        }
        let weight = parse_number(&record[2], "weight", line)?;
        edges.push(SpanningTreeEdge::new(&record[0], &record[1], weight));
    }
    Ok(edges)
}

pub fn load_tree(path: impl AsRef<Path>) -> Result<Vec<SpanningTreeEdge>> {
    read_tree(File::open(path.as_ref())?)
}
