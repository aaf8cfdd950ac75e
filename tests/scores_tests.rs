//! Score file tests

use std::fs;

use micro_tetris::scores::{format_table, ScoreFile, ScoreRecord, TABLE_HEADER};
use micro_tetris::types::HIGH_SCORE_LIMIT;

#[test]
fn test_record_creates_file_in_original_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tetris.scores");
    let file = ScoreFile::new(&path);

    file.record(&ScoreRecord::new(95, 4, "alice")).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "    380\t    95\t    4\talice\n"
    );
}

#[test]
fn test_only_best_ten_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let file = ScoreFile::new(dir.path().join("tetris.scores"));

    for points in 1..=15 {
        file.record(&ScoreRecord::new(points * 10, 1, "p")).unwrap();
    }

    let records = file.read_all().unwrap();
    assert_eq!(records.len(), HIGH_SCORE_LIMIT);
    assert_eq!(records.first().unwrap().score, 150);
    assert_eq!(records.last().unwrap().score, 60);
    assert!(records.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_record_returns_printable_table() {
    let dir = tempfile::tempdir().unwrap();
    let file = ScoreFile::new(dir.path().join("tetris.scores"));
    file.record(&ScoreRecord::new(7, 2, "bob")).unwrap();
    let table = file.record(&ScoreRecord::new(30, 1, "carol")).unwrap();

    let text = format_table(&table);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], TABLE_HEADER);
    assert!(lines[1].ends_with("carol"));
    assert!(lines[2].ends_with("bob"));
    assert_eq!(file.top(1).unwrap()[0].name, "carol");
}
