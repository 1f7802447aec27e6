// ============================================================
// Layer 3 — Character Domain Types
// ============================================================
// A CharacterRecord is one row of the character table: an
// occurrence of a character in a book, plus the bag of words
// that surrounds it in the text.
//
// Only `words` feeds the features. The other four columns are
// carried through unchanged so the scored output can be joined
// back to the corpus.

use serde::{Deserialize, Serialize};

/// One row of the source character table.
///
/// Extra columns in the table are ignored when deserialising.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Volume identifier
    pub docid: String,

    /// Character identifier, unique within the volume
    pub charid: String,

    /// Label from the source table; never used for scoring
    pub gender: String,

    pub pubdate: String,

    /// Space-delimited tokens. Repetition encodes frequency,
    /// order carries no meaning.
    pub words: String,
}

impl CharacterRecord {
    pub fn new(
        docid:   impl Into<String>,
        charid:  impl Into<String>,
        gender:  impl Into<String>,
        pubdate: impl Into<String>,
        words:   impl Into<String>,
    ) -> Self {
        Self {
            docid:   docid.into(),
            charid:  charid.into(),
            gender:  gender.into(),
            pubdate: pubdate.into(),
            words:   words.into(),
        }
    }
}

/// Metadata retained for a character that survived extraction.
///
/// `numwords` is the RAW token count of the source row, taken
/// before any forbidden-term filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMeta {
    pub docid:    String,
    pub charid:   String,
    pub gender:   String,
    pub pubdate:  String,
    pub numwords: usize,
}

impl RowMeta {
    /// Build the metadata for `record` with the given raw count.
    /// Consumes the record so identifiers are moved, not copied.
    pub fn from_record(record: CharacterRecord, numwords: usize) -> Self {
        Self {
            docid:   record.docid,
            charid:  record.charid,
            gender:  record.gender,
            pubdate: record.pubdate,
            numwords,
        }
    }
}
