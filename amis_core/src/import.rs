//! Vocabulary import from spreadsheets (Excel and CSV)

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;

use crate::error::{QuizError, Result};
use crate::vocabulary::{SentenceItem, VocabularyItem};

/// Column index mapping for a vocabulary sheet
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemColumns {
    pub headword: usize,
    pub translation: usize,
    pub gloss: Option<usize>,
    pub category: Option<usize>,
    pub emoji: Option<usize>,
}

/// Column index mapping for a sentence sheet
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SentenceColumns {
    pub phrase: usize,
    pub translation: usize,
}

fn is_translation_header(header: &str) -> bool {
    matches!(header, "translation" | "zh" | "chinese" | "meaning" | "中文")
}

/// Detect vocabulary columns from header names
pub fn detect_item_columns(headers: &[String]) -> Result<ItemColumns> {
    let mut headword = None;
    let mut translation = None;
    let mut columns = ItemColumns::default();

    for (i, header) in headers.iter().enumerate() {
        let header = header.trim().to_lowercase();
        match header.as_str() {
            "headword" | "amis" | "word" | "阿美語" => headword = Some(i),
            h if is_translation_header(h) => translation = Some(i),
            "gloss" | "action" | "動作" => columns.gloss = Some(i),
            "category" | "分類" => columns.category = Some(i),
            "emoji" => columns.emoji = Some(i),
            _ => {}
        }
    }

    columns.headword = headword
        .ok_or_else(|| QuizError::Import("Missing required 'Headword' column in file header".to_string()))?;
    columns.translation = translation
        .ok_or_else(|| QuizError::Import("Missing required 'Translation' column in file header".to_string()))?;
    Ok(columns)
}

/// Detect sentence columns from header names
pub fn detect_sentence_columns(headers: &[String]) -> Result<SentenceColumns> {
    let mut phrase = None;
    let mut translation = None;

    for (i, header) in headers.iter().enumerate() {
        let header = header.trim().to_lowercase();
        match header.as_str() {
            "phrase" | "sentence" | "amis" | "阿美語" => phrase = Some(i),
            h if is_translation_header(h) => translation = Some(i),
            _ => {}
        }
    }

    Ok(SentenceColumns {
        phrase: phrase
            .ok_or_else(|| QuizError::Import("Missing required 'Phrase' column in file header".to_string()))?,
        translation: translation
            .ok_or_else(|| QuizError::Import("Missing required 'Translation' column in file header".to_string()))?,
    })
}

/// Load vocabulary items from a spreadsheet (`.xlsx`, `.xls`, `.ods`, ...) or `.csv` file
pub fn load_items(path: &Path) -> Result<Vec<VocabularyItem>> {
    let rows = read_rows(path)?;
    let mut rows = rows.into_iter();
    let headers = rows
        .next()
        .ok_or_else(|| QuizError::Import("Empty file - no header row".to_string()))?;
    let columns = detect_item_columns(&headers)?;

    let items: Vec<VocabularyItem> = rows
        .filter_map(|row| {
            let headword = cell(&row, Some(columns.headword))?;
            Some(VocabularyItem {
                headword,
                translation: cell(&row, Some(columns.translation)).unwrap_or_default(),
                gloss: cell(&row, columns.gloss),
                category: cell(&row, columns.category),
                emoji: cell(&row, columns.emoji),
            })
        })
        .collect();

    log::info!("Imported {} vocabulary items from {}", items.len(), path.display());
    Ok(items)
}

/// Load sentence patterns from a spreadsheet or `.csv` file
pub fn load_sentences(path: &Path) -> Result<Vec<SentenceItem>> {
    let rows = read_rows(path)?;
    let mut rows = rows.into_iter();
    let headers = rows
        .next()
        .ok_or_else(|| QuizError::Import("Empty file - no header row".to_string()))?;
    let columns = detect_sentence_columns(&headers)?;

    let sentences: Vec<SentenceItem> = rows
        .filter_map(|row| {
            let phrase = cell(&row, Some(columns.phrase))?;
            Some(SentenceItem {
                phrase,
                translation: cell(&row, Some(columns.translation)).unwrap_or_default(),
            })
        })
        .collect();

    log::info!("Imported {} sentences from {}", sentences.len(), path.display());
    Ok(sentences)
}

/// Non-blank trimmed cell at `index`. A row missing its translation is kept
/// with an empty one so the store rejects it by name.
fn cell(row: &[String], index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Every row of the file as strings, header row first.
fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_spreadsheet_rows(path),
        "csv" => read_csv_rows(path),
        _ => Err(QuizError::Import(format!("Unsupported file format: .{}", extension))),
    }
}

/// First sheet of a workbook; calamine picks the reader (BIFF, OOXML, ODS)
/// from the extension.
fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| QuizError::Import(format!("Failed to open spreadsheet: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or_else(|| QuizError::Import("No sheets found in spreadsheet".to_string()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| QuizError::Import(format!("Failed to read sheet: {}", e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(get_cell_string).collect())
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.trim().to_string()).collect());
    }
    Ok(rows)
}

/// Helper to extract string from Excel cell
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::VocabularyStore;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_detect_item_columns() {
        let headers: Vec<String> = ["Emoji", "Amis", "ZH", "Action", "Notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = detect_item_columns(&headers).unwrap();
        assert_eq!(columns.headword, 1);
        assert_eq!(columns.translation, 2);
        assert_eq!(columns.gloss, Some(3));
        assert_eq!(columns.emoji, Some(0));
        assert_eq!(columns.category, None);
    }

    #[test]
    fn test_missing_translation_column() {
        let headers = vec!["Headword".to_string(), "Emoji".to_string()];
        let err = detect_item_columns(&headers).unwrap_err();
        assert!(err.to_string().contains("Translation"));
    }

    #[test]
    fn test_load_items_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "words.csv",
            "headword,translation,emoji,gloss\n\
             Fongoh,頭,🙆‍♂️,摸摸頭\n\
             ,,,\n\
             Mata,眼睛,👀,\n\
             \"Ngoso'\",鼻子\n",
        );

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].gloss.as_deref(), Some("摸摸頭"));
        assert_eq!(items[1].gloss, None);
        assert_eq!(items[2].headword, "Ngoso'");
        assert_eq!(items[2].emoji, None);
    }

    #[test]
    fn test_store_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let words = write_file(
            &dir,
            "words.csv",
            "amis,zh\nFongoh,頭\nMata,眼睛\nNgoso',鼻子\nTangila,耳朵\n",
        );
        let sentences = write_file(
            &dir,
            "sentences.csv",
            "phrase,translation\nO maan koni?,這是什麼？\nO {word} koni.,這是{word}。\n",
        );

        let store = VocabularyStore::from_files(&words, Some(sentences.as_path())).unwrap();
        assert_eq!(store.items().len(), 4);
        assert_eq!(store.sentences().len(), 2);
        assert!(store.sentences()[1].has_slot());
    }

    #[test]
    fn test_row_without_translation_rejected_by_store() {
        let dir = tempfile::tempdir().unwrap();
        let words = write_file(&dir, "words.csv", "word,meaning\nFongoh,頭\nMata,\nNgoso',鼻子\n");
        let err = VocabularyStore::from_files(&words, None).unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)));
    }

    #[test]
    fn test_legacy_xls_goes_to_spreadsheet_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "words.xls", "headword,translation\nMata,眼睛\n");
        let err = load_items(&path).unwrap_err();
        assert!(
            err.to_string().contains("Failed to open spreadsheet"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_items(Path::new("words.json")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format: .json"));
    }
}
