//! CSV score table export.
//!
//! The column layout is a file format contract with the frontend's export
//! button: a fixed 11-column header and one unquoted row per area. Field
//! values are assumed free of commas (planning area names are).

use std::io::Write;
use std::path::Path;

use transit_map_analytics_models::ScoreRecord;

use crate::ExportError;

/// The contracted header row.
pub const CSV_HEADER: &[&str] = &[
    "Planning Area",
    "Total Score",
    "Bus Score",
    "MRT Score",
    "Taxi Score",
    "Carpark Score",
    "Population",
    "Bus Stops",
    "MRT Stations",
    "Taxis",
    "Carparks",
];

/// Writes the score table as CSV.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(records: &[ScoreRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        csv_writer.write_record(&[
            record.area.clone(),
            record.total_score.to_string(),
            record.bus_score.to_string(),
            record.mrt_score.to_string(),
            record.taxi_score.to_string(),
            record.carpark_score.to_string(),
            record.population.to_string(),
            record.bus_stops.to_string(),
            record.mrt_stations.to_string(),
            record.taxis.to_string(),
            record.carparks.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders the score table as a CSV string.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn csv_string(records: &[ScoreRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ExportError::Conversion {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}

/// Writes the score table to a file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_csv_file(records: &[ScoreRecord], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    log::info!("Wrote {} score rows to {}", records.len(), path.display());
    Ok(())
}
