//! Practice sheet loading.
//!
//! The sheet is read once at startup into an immutable [`Dataset`]. Column
//! names are trimmed before lookup; only `Topic`, `Serial`, `Question` and
//! `Answer` are required. Pronunciation and translation columns may be
//! missing entirely or have blank cells, and both read back as empty strings.

mod reader;

pub use reader::RawTable;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const COL_TOPIC: &str = "Topic";
pub const COL_SERIAL: &str = "Serial";
pub const COL_QUESTION: &str = "Question";
pub const COL_QUESTION_PRONOUNCE: &str = "Question_Pronounce";
pub const COL_QUESTION_TRANSLATION: &str = "Question_Translation";
pub const COL_ANSWER: &str = "Answer";
pub const COL_ANSWER_PRONOUNCE: &str = "Answer_Pronounce";
pub const COL_ANSWER_TRANSLATION: &str = "Answer_Translation";

/// Failures while turning the practice sheet into a [`Dataset`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("failed to open workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook {} has no worksheets", .0.display())]
    NoWorksheet(PathBuf),
    #[error("unsupported data file {}; expected .xlsx, .xls, .ods or .csv", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("data file has no header row")]
    MissingHeader,
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: serial `{value}` is not an integer")]
    InvalidSerial { row: usize, value: String },
}

/// One question/answer row of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QaEntry {
    pub topic: String,
    /// `None` when the sheet leaves the serial cell blank.
    pub serial: Option<i64>,
    pub question: String,
    pub question_pronounce: String,
    pub question_translation: String,
    pub answer: String,
    pub answer_pronounce: String,
    pub answer_translation: String,
}

impl QaEntry {
    /// Text spoken when asking: the pronunciation hint if present, else the question.
    pub fn question_speech_text(&self) -> &str {
        prefer_pronounce(&self.question_pronounce, &self.question)
    }

    /// Text spoken for the sample answer, with the same fallback rule.
    pub fn answer_speech_text(&self) -> &str {
        prefer_pronounce(&self.answer_pronounce, &self.answer)
    }
}

fn prefer_pronounce<'a>(pronounce: &'a str, raw: &'a str) -> &'a str {
    if pronounce.is_empty() { raw } else { pronounce }
}

/// Immutable, load-ordered collection of practice rows.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<QaEntry>,
    topics: Vec<String>,
}

impl Dataset {
    pub fn new(entries: Vec<QaEntry>) -> Self {
        let mut topics: Vec<String> = Vec::new();
        for entry in &entries {
            if !topics.contains(&entry.topic) {
                topics.push(entry.topic.clone());
            }
        }
        Self { entries, topics }
    }

    /// Load the sheet at `path`. Workbooks use `sheet` when given, otherwise
    /// their first worksheet.
    pub fn load(path: &Path, sheet: Option<&str>) -> Result<Self, DatasetError> {
        info!(path = %path.display(), sheet = ?sheet, "Loading practice data");
        let table = reader::read_table(path, sheet)?;
        let dataset = Self::from_table(table)?;
        info!(
            rows = dataset.len(),
            topics = dataset.topics.len(),
            "Loaded practice data"
        );
        Ok(dataset)
    }

    pub fn from_table(table: RawTable) -> Result<Self, DatasetError> {
        let columns = ColumnMap::resolve(&table.headers)?;
        let mut entries = Vec::with_capacity(table.rows.len());

        for (idx, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            // Sheet row numbers are 1-based and the header occupies row 1.
            let row_number = idx + 2;
            entries.push(columns.entry(row, row_number)?);
        }

        debug!(
            rows = entries.len(),
            skipped = table.rows.len() - entries.len(),
            "Resolved practice rows"
        );
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct topics in the order they first appear in the sheet.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Rows of `topic` sorted by serial; equal serials keep load order and
    /// rows without a serial come last.
    pub fn entries_for_topic(&self, topic: &str) -> Vec<&QaEntry> {
        let mut rows: Vec<&QaEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .collect();
        rows.sort_by_key(|entry| (entry.serial.is_none(), entry.serial));
        rows
    }

    pub fn topic_len(&self, topic: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .count()
    }
}

struct ColumnMap {
    topic: usize,
    serial: usize,
    question: usize,
    answer: usize,
    question_pronounce: Option<usize>,
    question_translation: Option<usize>,
    answer_pronounce: Option<usize>,
    answer_translation: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |name: &str| names.iter().position(|candidate| *candidate == name);
        let require = |name: &'static str| find(name).ok_or(DatasetError::MissingColumn(name));

        Ok(Self {
            topic: require(COL_TOPIC)?,
            serial: require(COL_SERIAL)?,
            question: require(COL_QUESTION)?,
            answer: require(COL_ANSWER)?,
            question_pronounce: find(COL_QUESTION_PRONOUNCE),
            question_translation: find(COL_QUESTION_TRANSLATION),
            answer_pronounce: find(COL_ANSWER_PRONOUNCE),
            answer_translation: find(COL_ANSWER_TRANSLATION),
        })
    }

    fn entry(&self, row: &[String], row_number: usize) -> Result<QaEntry, DatasetError> {
        let cell = |idx: usize| row.get(idx).map(|value| value.trim()).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("").to_string();

        Ok(QaEntry {
            topic: cell(self.topic).to_string(),
            serial: parse_serial(cell(self.serial), row_number)?,
            question: cell(self.question).to_string(),
            question_pronounce: optional(self.question_pronounce),
            question_translation: optional(self.question_translation),
            answer: cell(self.answer).to_string(),
            answer_pronounce: optional(self.answer_pronounce),
            answer_translation: optional(self.answer_translation),
        })
    }
}

/// Blank cells are allowed; anything else must be an integer, possibly
/// written as a float by the spreadsheet.
fn parse_serial(raw: &str, row: usize) -> Result<Option<i64>, DatasetError> {
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Some(value));
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(Some(value as i64)),
        _ => Err(DatasetError::InvalidSerial {
            row,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn entry(topic: &str, serial: i64, question: &str, answer: &str) -> QaEntry {
        QaEntry {
            topic: topic.to_string(),
            serial: Some(serial),
            question: question.to_string(),
            answer: answer.to_string(),
            ..QaEntry::default()
        }
    }

    fn load_csv(text: &str) -> Result<Dataset, DatasetError> {
        Dataset::from_table(reader::read_csv(text.as_bytes())?)
    }

    const SHEET: &str = "\
 Topic , Serial ,Question,Question_Pronounce,Question_Translation,Answer,Answer_Pronounce,Answer_Translation
Greetings,3,How are you?,haw ar yoo,Wie geht's?,I am fine.,,Mir geht's gut.
Travel,1,Where is the station?,,,It is over there.,it iz oh-ver thair,
Greetings,1,Hello!,heh-loh,Hallo!,Hi there.,hi thair,Hallo.
Greetings,2.0,Good morning.,,,Morning!,,
,,,,,,,
";

    #[test]
    fn trims_headers_and_orders_topics_by_first_appearance() {
        let dataset = load_csv(SHEET).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.topics(), ["Greetings", "Travel"]);
    }

    #[test]
    fn entries_for_topic_sorted_by_serial() {
        let dataset = load_csv(SHEET).unwrap();
        let serials: Vec<Option<i64>> = dataset
            .entries_for_topic("Greetings")
            .iter()
            .map(|entry| entry.serial)
            .collect();
        assert_eq!(serials, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(dataset.topic_len("Greetings"), 3);
        assert!(dataset.entries_for_topic("Unknown").is_empty());
    }

    #[test]
    fn equal_serials_keep_load_order() {
        let dataset = Dataset::new(vec![
            entry("T", 2, "second-a", "a"),
            entry("T", 1, "first", "a"),
            entry("T", 2, "second-b", "a"),
        ]);
        let questions: Vec<&str> = dataset
            .entries_for_topic("T")
            .iter()
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(questions, vec!["first", "second-a", "second-b"]);
    }

    #[test]
    fn blank_optional_cells_read_as_empty() {
        let dataset = load_csv(SHEET).unwrap();
        let travel = dataset.entries_for_topic("Travel");
        assert_eq!(travel[0].question_pronounce, "");
        assert_eq!(travel[0].answer_translation, "");
        assert_eq!(travel[0].question_speech_text(), "Where is the station?");
        assert_eq!(travel[0].answer_speech_text(), "it iz oh-ver thair");
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let dataset = load_csv("Topic,Serial,Question,Answer\nFood,1,Hungry?,Yes.\n").unwrap();
        let food = dataset.entries_for_topic("Food");
        assert_eq!(food[0].answer_pronounce, "");
        assert_eq!(food[0].answer_speech_text(), "Yes.");
    }

    #[test]
    fn missing_required_column_fails() {
        let err = load_csv("Topic,Serial,Question\nFood,1,Hungry?\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("Answer")));
    }

    #[test]
    fn non_integer_serial_reports_sheet_row() {
        let err = load_csv("Topic,Serial,Question,Answer\nFood,1.5,Hungry?,Yes.\n").unwrap_err();
        match err {
            DatasetError::InvalidSerial { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_serial_sorts_after_numbered_rows() {
        let dataset = load_csv(
            "Topic,Serial,Question,Answer\n\
             Food,,Thirsty?,Water.\n\
             Food,2,Dessert?,Cake.\n\
             Food,,Coffee?,Black.\n\
             Food,1,Hungry?,Yes.\n",
        )
        .unwrap();
        let questions: Vec<&str> = dataset
            .entries_for_topic("Food")
            .iter()
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(questions, vec!["Hungry?", "Dessert?", "Thirsty?", "Coffee?"]);
        assert_eq!(dataset.entries_for_topic("Food")[2].serial, None);
    }

    #[test]
    fn byte_order_mark_is_ignored_in_headers() {
        let dataset =
            load_csv("\u{feff}Topic,Serial,Question,Answer\nFood,1,Hungry?,Yes.\n").unwrap();
        assert_eq!(dataset.topics(), ["Food"]);
    }

    #[test]
    fn load_reads_csv_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SHEET.as_bytes()).unwrap();
        let dataset = Dataset::load(file.path(), None).unwrap();
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn load_reads_xlsx_workbook() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/practice.xlsx");
        let dataset = Dataset::load(&path, None).unwrap();
        assert_eq!(dataset.topics(), ["Greetings", "Travel"]);

        let greetings = dataset.entries_for_topic("Greetings");
        let questions: Vec<&str> = greetings.iter().map(|entry| entry.question.as_str()).collect();
        assert_eq!(questions, vec!["Hello!", "Good morning.", "See you?"]);
        assert_eq!(greetings[0].question_speech_text(), "heh-loh");
        assert_eq!(greetings[1].answer_translation, "Guten Morgen!");
        assert_eq!(greetings[2].serial, None);
        assert_eq!(greetings[2].answer_pronounce, "");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/practice.csv"), None).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
