use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::loader::DATE_FORMAT;
use super::model::DATE_COLUMN;

/// Write the filtered rows to `path` as CSV. Returns the number of rows.
pub fn export_view(view: &FilteredView, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let n = write_view(view, file).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {n} sightings to {}", path.display());
    Ok(n)
}

/// Loaded columns in file order (`Index` stays dropped), `Date` as
/// `YYYY-MM-DD`.
pub fn write_view<W: io::Write>(view: &FilteredView, out: W) -> Result<usize> {
    let columns = view.dataset().column_names();
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns)?;

    let mut n = 0;
    for s in view.records() {
        let date = s.date.format(DATE_FORMAT).to_string();
        let row = columns.iter().map(|col| {
            if col == DATE_COLUMN {
                date.as_str()
            } else {
                s.field(col).unwrap_or("")
            }
        });
        writer.write_record(row)?;
        n += 1;
    }
    writer.flush()?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{apply_filters, FilterSelection};
    use crate::data::loader::load_dataset_from_reader;

    const SAMPLE: &str = "\
Index,Date,City,Colors Reported,Shape Reported,State
0,2020-06-01,Dover,BLUE,OVAL,DE
1,2020-01-01,Salem,RED,CIRCLE,OR
2,2020-03-15,Reno,RED,,NV
";

    #[test]
    fn writes_matching_rows_without_index() {
        let ds = Arc::new(load_dataset_from_reader(SAMPLE.as_bytes()).unwrap());
        let mut sel = FilterSelection::full_range(&ds);
        sel.color_reported = Some("RED".into());
        let view = apply_filters(&ds, &sel).unwrap();

        let mut buf = Vec::new();
        let n = write_view(&view, &mut buf).unwrap();

        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\
Date,City,Colors Reported,Shape Reported,State
2020-01-01,Salem,RED,CIRCLE,OR
2020-03-15,Reno,RED,,NV
"
        );
    }

    #[test]
    fn export_writes_header_and_all_rows() {
        let ds = Arc::new(load_dataset_from_reader(SAMPLE.as_bytes()).unwrap());
        let view = apply_filters(&ds, &FilterSelection::full_range(&ds)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert_eq!(export_view(&view, &path).unwrap(), 3);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
