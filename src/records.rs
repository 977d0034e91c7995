//! CSV storage for pings.
//!
//! Layout is one header row (`ID,Latitude,Longitude,Timestamp`) followed by one
//! row per ping. Columns are read by position, so the header text is not checked.
//! Rows with the wrong number of fields, or that cannot be turned into a finite
//! location, are rejected with the line they came from.

use crate::cluster::Point;
use crate::error::{Error, Result};
use crate::ping::Ping;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

pub const HEADER: [&str; 4] = ["ID", "Latitude", "Longitude", "Timestamp"];
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Serialize)]
struct Row {
    id: u64,
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

#[derive(Deserialize)]
struct RawRow {
    id: String,
    latitude: String,
    longitude: String,
    timestamp: String,
}

impl RawRow {
    fn into_ping(self, line: u64) -> Result<Ping> {
        let record_err = |message: String| Error::Record { line, message };

        let id = self
            .id
            .parse::<u64>()
            .map_err(|e| record_err(format!("invalid id {:?}: {e}", self.id)))?;
        let lat = parse_coordinate("latitude", &self.latitude).map_err(record_err)?;
        let lon = parse_coordinate("longitude", &self.longitude).map_err(record_err)?;
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| record_err(format!("invalid timestamp {:?}: {e}", self.timestamp)))?;

        Ok(Ping {
            id,
            lat,
            lon,
            timestamp,
        })
    }
}

fn parse_coordinate(name: &str, raw: &str) -> std::result::Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("invalid {name} {raw:?}: {e}"))?;
    if !value.is_finite() {
        return Err(format!("{name} {raw:?} is not finite"));
    }
    Ok(value)
}

/// Write the header and one row per ping.
pub fn write_pings<W: Write>(writer: W, pings: &[Ping]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for p in pings {
        wtr.serialize(Row {
            id: p.id,
            latitude: p.lat,
            longitude: p.lon,
            timestamp: p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read pings, skipping the header row.
pub fn read_pings<R: Read>(reader: R) -> Result<Vec<Ping>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pings = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != HEADER.len() {
            return Err(Error::Record {
                line,
                message: format!("expected {} fields, found {}", HEADER.len(), record.len()),
            });
        }
        let raw: RawRow = record.deserialize(None).map_err(|e| Error::Record {
            line,
            message: e.to_string(),
        })?;
        pings.push(raw.into_ping(line)?);
    }
    Ok(pings)
}

pub fn save(path: impl AsRef<Path>, pings: &[Ping]) -> Result<()> {
    let path = path.as_ref();
    write_pings(BufWriter::new(File::create(path)?), pings)?;
    debug!(path = %path.display(), count = pings.len(), "saved pings");
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Ping>> {
    let path = path.as_ref();
    let pings = read_pings(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = pings.len(), "loaded pings");
    Ok(pings)
}

/// Latitude/longitude of each ping, in order, as clustering input.
pub fn locations(pings: &[Ping]) -> Vec<Point> {
    pings.iter().map(Ping::location).collect()
}
