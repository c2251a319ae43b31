use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;

use super::model::{
    Dataset, Sighting, COLOR_COLUMN, DATE_COLUMN, INDEX_COLUMN, SHAPE_COLUMN,
};
use crate::error::DataLoadError;

/// Format of the `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the sighting dataset from a CSV file.
///
/// Layout: header row, required columns `Index`, `Date`, `Colors Reported`,
/// `Shape Reported`; any other columns are carried through untouched.
/// `Index` is dropped, `Date` must be `YYYY-MM-DD`, and the rows come back
/// stably sorted by date.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_dataset_from_reader(file)?;
    log::info!(
        "Loaded {} sightings from {} ({} .. {})",
        dataset.len(),
        path.display(),
        dataset.min_date(),
        dataset.max_date()
    );
    Ok(dataset)
}

/// Same as [`load_dataset`] but over any reader.
pub fn load_dataset_from_reader<R: io::Read>(rdr: R) -> Result<Dataset, DataLoadError> {
    read_dataset(csv::Reader::from_reader(rdr))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn read_dataset<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset, DataLoadError> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(DataLoadError::Header)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut seen = BTreeSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(DataLoadError::DuplicateColumn(dup.clone()));
    }

    let index_idx = column_index(&headers, INDEX_COLUMN)?;
    let date_idx = column_index(&headers, DATE_COLUMN)?;
    let color_idx = column_index(&headers, COLOR_COLUMN)?;
    let shape_idx = column_index(&headers, SHAPE_COLUMN)?;

    // Pass-through columns: everything that is not one of the four above.
    let extra_cols: Vec<(usize, &String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| ![index_idx, date_idx, color_idx, shape_idx].contains(i))
        .collect();

    let mut sightings = Vec::new();

    for (i, result) in reader.records().enumerate() {
        // 1-based data row, header excluded.
        let row = i + 1;
        let record = result.map_err(|source| DataLoadError::Malformed { row, source })?;

        let raw_date = record.get(date_idx).unwrap_or("");
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|source| {
            DataLoadError::InvalidDate {
                row,
                value: raw_date.to_string(),
                source,
            }
        })?;

        let sighting = Sighting::new(
            date,
            record.get(color_idx).unwrap_or(""),
            record.get(shape_idx).unwrap_or(""),
        );
        sightings.push(extra_cols.iter().fold(sighting, |s, (idx, name)| {
            s.with_extra(name, record.get(*idx).unwrap_or(""))
        }));
    }

    log::debug!("Parsed {} CSV rows", sightings.len());

    let column_names = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index_idx)
        .map(|(_, h)| h.clone())
        .collect();

    Dataset::from_sightings(sightings, column_names)
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, DataLoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(DataLoadError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::STATE_COLUMN;

    const SAMPLE: &str = "\
Index,City,Colors Reported,Shape Reported,State,Date
0,Ithaca,RED,DISK,NY,1933-06-01
1,Willingboro,,OTHER,NJ,1930-06-30
2,Holyoke,,OVAL,CO,1931-02-15
3,Abilene,ORANGE,DISK,KS,1931-06-01
4,Valley City,,CIRCLE,ND,1930-06-30
";

    #[test]
    fn loads_and_sorts_by_date() {
        let ds = load_dataset_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(ds.len(), 5);
        for pair in ds.sightings().windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
        // Stable sort: Willingboro precedes Valley City on the shared date.
        let cities: Vec<&str> = ds
            .sightings()
            .iter()
            .map(|s| s.field("City").unwrap())
            .collect();
        assert_eq!(
            cities,
            ["Willingboro", "Valley City", "Holyoke", "Abilene", "Ithaca"]
        );
    }

    #[test]
    fn drops_index_and_keeps_other_columns_in_order() {
        let ds = load_dataset_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            ds.column_names(),
            ["City", "Colors Reported", "Shape Reported", "State", "Date"]
        );
        let first = &ds.sightings()[0];
        assert!(first.field(INDEX_COLUMN).is_none());
        assert_eq!(first.field(STATE_COLUMN), Some("NJ"));
    }

    #[test]
    fn derives_filter_options_and_bounds() {
        let ds = load_dataset_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(ds.colors(), ["ORANGE", "RED"]);
        assert_eq!(ds.shapes(), ["CIRCLE", "DISK", "OTHER", "OVAL"]);
        assert_eq!(ds.min_date(), NaiveDate::from_ymd_opt(1930, 6, 30).unwrap());
        assert_eq!(ds.max_date(), NaiveDate::from_ymd_opt(1933, 6, 1).unwrap());
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "Index,Date,Colors Reported\n0,2020-01-01,RED\n";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("Shape Reported")));
    }

    #[test]
    fn index_column_is_required() {
        let csv = "Date,Colors Reported,Shape Reported\n2020-01-01,RED,DISK\n";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("Index")));
    }

    #[test]
    fn unparseable_date_fails_with_row() {
        let csv = "\
Index,Date,Colors Reported,Shape Reported
0,2020-01-01,RED,DISK
1,06/30/1930,,OVAL
";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::InvalidDate { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "06/30/1930");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_is_malformed() {
        let csv = "\
Index,Date,Colors Reported,Shape Reported
0,2020-01-01,RED,DISK
1,2020-01-02,RED
";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Malformed { row: 2, .. }));
    }

    #[test]
    fn repeated_header_is_rejected() {
        let csv = "\
Index,Date,Colors Reported,Shape Reported,Note,Note
0,2020-01-01,Red,Circle,a,b
";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::DuplicateColumn(name) => assert_eq!(name, "Note"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_header_fails() {
        let csv: &[u8] = b"Index,D\xffate,Colors Reported,Shape Reported\n0,2020-01-01,Red,Disk\n";
        let err = load_dataset_from_reader(csv).unwrap_err();
        assert!(matches!(err, DataLoadError::Header(_)));
        assert!(err.to_string().starts_with("failed to read CSV header"));
    }

    #[test]
    fn header_only_is_empty() {
        let csv = "Index,Date,Colors Reported,Shape Reported\n";
        let err = load_dataset_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Open { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }
}
