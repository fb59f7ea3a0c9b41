//! CSV passes over a band listing
//!
//! Every pass reads the listing once, rewrites the genre column of each row
//! and writes the row back with all other fields and the header untouched.

use crate::progress::RowProgress;
use anyhow::{bail, Context, Result};
use csv::{Reader, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of a rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub rows: usize,
    pub genre_column_found: bool,
}

fn open_reader(input: &Path) -> Result<Reader<File>> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }
    ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("Failed to open {}", input.display()))
}

fn read_headers(reader: &mut Reader<File>, input: &Path) -> Result<StringRecord> {
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read headers of {}", input.display()))?
        .clone();
    if headers.is_empty() {
        bail!("Could not read CSV headers from {}", input.display());
    }
    Ok(headers)
}

/// Position of the genre column, ignoring a leading byte-order mark
pub fn column_index(headers: &StringRecord, column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|name| name.trim_start_matches('\u{feff}') == column)
}

/// Rewrite the genre column of every row with `transform`
///
/// The output only replaces `output` once every row has been written. When
/// the column is missing the rows are copied unchanged.
pub fn rewrite_genre_column<F>(
    input: &Path,
    output: &Path,
    column: &str,
    progress: &mut RowProgress,
    mut transform: F,
) -> Result<PassSummary>
where
    F: FnMut(&str) -> String,
{
    let mut reader = open_reader(input)?;
    let headers = read_headers(&mut reader, input)?;
    let genre_index = column_index(&headers, column);
    if genre_index.is_none() {
        log::warn!("No '{}' column in {}, rows are copied unchanged", column, input.display());
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut staged);
        writer.write_record(&headers)?;

        let mut fields: Vec<String> = Vec::with_capacity(headers.len());
        for (index, result) in reader.records().enumerate() {
            // Header is line 1
            let record =
                result.with_context(|| format!("Failed to read row at line {}", index + 2))?;

            fields.clear();
            fields.extend(record.iter().map(str::to_string));
            if fields.len() < headers.len() {
                fields.resize(headers.len(), String::new());
            }

            if let Some(i) = genre_index {
                fields[i] = transform(&fields[i]);
            }

            writer.write_record(&fields)?;
            progress.tick();
        }

        writer.flush()?;
    }

    staged
        .persist(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(PassSummary {
        rows: progress.rows(),
        genre_column_found: genre_index.is_some(),
    })
}

/// Every row's genre value, empty when the row or listing lacks the column
pub fn collect_genre_fields(input: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = open_reader(input)?;
    let headers = read_headers(&mut reader, input)?;
    let genre_index = column_index(&headers, column);
    if genre_index.is_none() {
        log::warn!("No '{}' column in {}", column, input.display());
    }

    let mut fields = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row at line {}", index + 2))?;
        let genre = genre_index
            .and_then(|i| record.get(i))
            .unwrap_or_default();
        fields.push(genre.to_string());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_listing(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("bands.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_rewrite_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_listing(
            dir.path(),
            "name,genre,city\nVoid,\"Black, Doom\",Leeds\n\"Smith, J\",Thrash,\"Bristol\"\n",
        );
        let output = dir.path().join("out.csv");

        let mut progress = RowProgress::hidden("test", 0);
        let summary =
            rewrite_genre_column(&input, &output, "genre", &mut progress, |g| g.to_uppercase())
                .unwrap();

        assert_eq!(summary, PassSummary { rows: 2, genre_column_found: true });
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "name,genre,city\nVoid,\"BLACK, DOOM\",Leeds\n\"Smith, J\",THRASH,Bristol\n"
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_listing(dir.path(), "name,city,genre\nVoid,Leeds\n");
        let output = dir.path().join("out.csv");

        let mut progress = RowProgress::hidden("test", 0);
        rewrite_genre_column(&input, &output, "genre", &mut progress, |g| format!("[{}]", g))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "name,city,genre\nVoid,Leeds,[]\n");
    }

    #[test]
    fn test_missing_column_copies_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_listing(dir.path(), "name,style\nVoid,Black\n");
        let output = dir.path().join("out.csv");

        let mut progress = RowProgress::hidden("test", 0);
        let summary =
            rewrite_genre_column(&input, &output, "genre", &mut progress, |_| unreachable!())
                .unwrap();

        assert!(!summary.genre_column_found);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "name,style\nVoid,Black\n");
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let mut progress = RowProgress::hidden("test", 0);

        let missing = dir.path().join("nope.csv");
        let err = rewrite_genre_column(&missing, &output, "genre", &mut progress, |g| g.to_string())
            .unwrap_err();
        assert!(err.to_string().starts_with("Input file not found"));
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_file_has_no_headers() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_listing(dir.path(), "");
        assert!(collect_genre_fields(&input, "genre").is_err());
    }

    #[test]
    fn test_collect_genre_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_listing(
            dir.path(),
            "\u{feff}genre,name\nBlack/Doom,Void\n,Empty\nThrash\n",
        );

        let fields = collect_genre_fields(&input, "genre").unwrap();
        assert_eq!(fields, vec!["Black/Doom", "", "Thrash"]);

        let missing = collect_genre_fields(&input, "style").unwrap();
        assert_eq!(missing, vec!["", "", ""]);
    }
}
