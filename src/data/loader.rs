use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{
    FlowProfile, ProfileError, COL_AVERAGE_VELOCITY_Y, COL_BIN_MID_POINT, COL_DENSITY,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a flow profile from a CSV file.
///
/// CSV layout: a header row naming at least `BinMidPoint`,
/// `AverageVelocityY` and `Density` (any order, extra columns ignored),
/// followed by one numeric row per bin. Whitespace around fields is
/// trimmed, so `0, 1.5, 10` parses as well as `0,1.5,10`.
pub fn load_profile(path: &Path) -> Result<FlowProfile> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let mut profile =
        read_profile(file).with_context(|| format!("loading {}", path.display()))?;
    profile.source = path.to_path_buf();
    log::info!("Loaded {} bins from {}", profile.len(), path.display());
    Ok(profile)
}

/// Parse a profile from any reader. The returned profile has an empty `source`.
pub fn read_profile<R: Read>(input: R) -> Result<FlowProfile> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let x_idx = column_index(&headers, COL_BIN_MID_POINT)?;
    let v_idx = column_index(&headers, COL_AVERAGE_VELOCITY_Y)?;
    let d_idx = column_index(&headers, COL_DENSITY)?;

    let mut profile = FlowProfile::new("");

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let x = parse_cell(&record, x_idx, row_no, COL_BIN_MID_POINT)?;
        let v = parse_cell(&record, v_idx, row_no, COL_AVERAGE_VELOCITY_Y)?;
        let d = parse_cell(&record, d_idx, row_no, COL_DENSITY)?;

        profile.push(x, v, d);
    }

    Ok(profile)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn column_index(headers: &[String], name: &str) -> Result<usize, ProfileError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ProfileError::MissingColumn(name.to_string()))
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<f64, ProfileError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| ProfileError::InvalidNumber {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_error(err: anyhow::Error) -> ProfileError {
        err.downcast::<ProfileError>()
            .expect("expected a ProfileError in the chain")
    }

    #[test]
    fn reads_named_columns_in_any_order() {
        let csv = "Density,Extra,BinMidPoint,AverageVelocityY\n10,a,0,1.0\n20,b,1,2.0\n15,c,2,1.5\n";
        let profile = read_profile(csv.as_bytes()).unwrap();

        assert_eq!(profile.bin_mid_point, vec![0.0, 1.0, 2.0]);
        assert_eq!(profile.average_velocity_y, vec![1.0, 2.0, 1.5]);
        assert_eq!(profile.density, vec![10.0, 20.0, 15.0]);
    }

    #[test]
    fn tolerates_spaces_after_commas() {
        let csv = "BinMidPoint, AverageVelocityY, Density\n0.5, -0.25, 3\n";
        let profile = read_profile(csv.as_bytes()).unwrap();

        assert_eq!(profile.velocity_points(), vec![(0.5, -0.25)]);
        assert_eq!(profile.density, vec![3.0]);
    }

    #[test]
    fn header_only_is_an_empty_profile() {
        let profile = read_profile("BinMidPoint,AverageVelocityY,Density\n".as_bytes()).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_profile("BinMidPoint,Density\n0,1\n".as_bytes()).unwrap_err();
        assert_eq!(
            profile_error(err),
            ProfileError::MissingColumn("AverageVelocityY".into())
        );
    }

    #[test]
    fn non_numeric_cell_is_reported_with_position() {
        let csv = "BinMidPoint,AverageVelocityY,Density\n0,1,10\n1,fast,20\n";
        let err = read_profile(csv.as_bytes()).unwrap_err();
        assert_eq!(
            profile_error(err),
            ProfileError::InvalidNumber {
                row: 1,
                column: "AverageVelocityY".into(),
                value: "fast".into(),
            }
        );
    }

    #[test]
    fn ragged_rows_fail() {
        let csv = "BinMidPoint,AverageVelocityY,Density\n0,1,10\n1,2\n";
        assert!(read_profile(csv.as_bytes()).is_err());
    }
}
