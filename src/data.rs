use crate::config::InputConfig;
use crate::types::VolcanoRecord;
use anyhow::{anyhow, ensure, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

pub fn load_data(input: &InputConfig) -> Result<Vec<VolcanoRecord>> {
    info!("Loading volcano data from {:?}...", input.volcano_csv);

    let file = File::open(&input.volcano_csv)
        .with_context(|| format!("Failed to open volcano file: {:?}", input.volcano_csv))?;
    let volcanoes = parse_volcanoes(file, input)
        .with_context(|| format!("Failed to read volcano file: {:?}", input.volcano_csv))?;

    info!("Loaded {} volcanoes", volcanoes.len());
    Ok(volcanoes)
}

struct ColumnIndices {
    lat: usize,
    lon: usize,
    elev: usize,
}

pub fn parse_volcanoes<R: Read>(reader: R, input: &InputConfig) -> Result<Vec<VolcanoRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(input.delimiter as u8)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let find = |name: &str| {
        headers.iter().position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found in volcano data", name))
    };
    let columns = ColumnIndices {
        lat: find(&input.lat_column)?,
        lon: find(&input.lon_column)?,
        elev: find(&input.elev_column)?,
    };
    debug!(lat = columns.lat, lon = columns.lon, elev = columns.elev, "Resolved column indices");

    let mut volcanoes = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("Malformed row {}", row))?;

        let lat = parse_field(&record, columns.lat, &input.lat_column, row)?;
        let lon = parse_field(&record, columns.lon, &input.lon_column, row)?;
        let elevation = parse_field(&record, columns.elev, &input.elev_column, row)?;

        ensure!((-90.0..=90.0).contains(&lat),
            "Row {}, column '{}': latitude {} is outside [-90, 90]", row, input.lat_column, lat);
        ensure!((-180.0..=180.0).contains(&lon),
            "Row {}, column '{}': longitude {} is outside [-180, 180]", row, input.lon_column, lon);

        volcanoes.push(VolcanoRecord::new(lat, lon, elevation));
    }

    Ok(volcanoes)
}

fn parse_field(record: &StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(idx)
        .ok_or_else(|| anyhow!("Row {} has no '{}' field", row, column))?;
    let value = raw.parse::<f64>()
        .with_context(|| format!("Row {}, column '{}': '{}' is not a number", row, column, raw))?;
    // parse() accepts nan and inf
    ensure!(value.is_finite(), "Row {}, column '{}': '{}' is not a finite number", row, column, raw);
    Ok(value)
}
