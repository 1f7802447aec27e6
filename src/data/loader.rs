// ============================================================
// Layer 4 — Character Table Loader
// ============================================================
// Streams rows of a tab-separated character table.
//
// The table is read lazily, one record at a time, so a table
// of millions of characters never has to fit in memory. Each
// row is deserialised into a CharacterRecord by serde; columns
// the struct does not name are ignored.
//
// Expected header (at least):
//   docid  charid  gender  pubdate  words
//
// Reference: csv crate documentation
//            Rust Book §13 (Iterators)

use anyhow::{bail, Context, Result};
use std::{fs::File, io::Read, path::Path};

use crate::domain::character::CharacterRecord;

/// Columns every source table must carry
pub const REQUIRED_COLUMNS: [&str; 5] = ["docid", "charid", "gender", "pubdate", "words"];

pub struct CharacterTableReader<R: Read> {
    reader: csv::Reader<R>,
    source: String,
}

impl CharacterTableReader<File> {
    /// Open a character table on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Cannot open source table '{}'", path.display()))?;
        Self::from_reader(file, path.display().to_string())
    }
}

impl<R: Read> CharacterTableReader<R> {
    /// Wrap any reader. `source` is only used in error messages.
    pub fn from_reader(rdr: R, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            // Surplus trailing fields are tolerated; a short row still
            // fails when serde looks for a missing column.
            .flexible(true)
            .from_reader(rdr);

        // Fail before the first row if the table cannot be scored at all
        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", source))?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!("Source table '{}' has no '{}' column", source, column);
            }
        }

        Ok(Self { reader, source })
    }

    /// Lazily iterate over the records in file order.
    /// A malformed row surfaces as an error carrying its line number.
    pub fn records(&mut self) -> impl Iterator<Item = Result<CharacterRecord>> + '_ {
        let source = &self.source;
        self.reader
            .deserialize::<CharacterRecord>()
            .map(move |row| {
                row.with_context(|| format!("Malformed row in '{}'", source))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
docid\tcharid\tgender\tpubdate\twords\textra
v1\tv1|1\tf\t1850\tgarden rose\tignored
v2\tv2|7\tm\t1899\tsea ship storm\tignored
";

    #[test]
    fn test_reads_rows_in_order() {
        let mut t = CharacterTableReader::from_reader(TABLE.as_bytes(), "mem").unwrap();
        let rows: Vec<CharacterRecord> = t.records().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].docid, "v1");
        assert_eq!(rows[0].words, "garden rose");
        assert_eq!(rows[1].charid, "v2|7");
        assert_eq!(rows[1].pubdate, "1899");
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let table = "docid\tcharid\tgender\tpubdate\nv1\tc\tf\t1850\n";
        let err = CharacterTableReader::from_reader(table.as_bytes(), "mem")
            .err()
            .unwrap();
        assert!(err.to_string().contains("'words'"));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let table = "docid\tcharid\tgender\tpubdate\twords\nv1\tc\tf\n";
        let mut t = CharacterTableReader::from_reader(table.as_bytes(), "mem").unwrap();
        let first = t.records().next().unwrap();
        assert!(first.is_err());
    }

    #[test]
    fn test_trailing_extra_field_is_ignored() {
        let table = "docid\tcharid\tgender\tpubdate\twords\n\
                     v1\tc\tf\t1850\tgarden rose\tstray\n\
                     v2\td\tm\t1851\tsea ship\n";
        let mut t = CharacterTableReader::from_reader(table.as_bytes(), "mem").unwrap();
        let rows: Vec<CharacterRecord> = t.records().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].words, "garden rose");
        assert_eq!(rows[1].docid, "v2");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let err = CharacterTableReader::open("/definitely/not/here.tsv").err().unwrap();
        assert!(err.to_string().contains("Cannot open source table"));
    }
}
