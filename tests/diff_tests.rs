//! End-to-end tests of the diff engine on in-memory tables.

use xlcompare::diff::{CellRendering, DiffEngine, DiffSegment, RowDiffStatus};
use xlcompare::{compute_diff, CompareError, Config, Table};

fn table(file: &str, header: &[&str], rows: Vec<Vec<&str>>) -> Table {
    Table::from_records("Sheet1", file, header, rows)
}

fn people_old() -> Table {
    table("old.xlsx", &["ID", "Name"], vec![vec!["1", "Tom"], vec!["2", "Sam"]])
}

fn people_new() -> Table {
    table("new.xlsx", &["ID", "Name"], vec![vec!["1", "Tom"], vec!["3", "Ann"]])
}

#[test]
fn test_row_reconciliation_example() {
    let diff = compute_diff(&people_old(), &people_new(), &Config::default()).unwrap();

    let keys: Vec<&str> = diff.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["1", "3", "2"]);

    let statuses: Vec<RowDiffStatus> = diff.rows.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            RowDiffStatus::Unchanged,
            RowDiffStatus::Inserted,
            RowDiffStatus::Deleted,
        ]
    );

    assert_eq!(diff.stats.inserted, 1);
    assert_eq!(diff.stats.deleted, 1);
    assert_eq!(diff.stats.modified, 0);
    assert_eq!(diff.stats.report(), vec!["Inserted rows: 1", "Deleted rows: 1"]);
}

#[test]
fn test_inserted_and_deleted_rows_render_whole_cells() {
    let diff = compute_diff(&people_old(), &people_new(), &Config::default()).unwrap();

    assert_eq!(
        diff.rows[1].cells,
        vec![
            CellRendering::Inserted("3".into()),
            CellRendering::Inserted("Ann".into()),
        ]
    );
    assert_eq!(
        diff.rows[2].cells,
        vec![
            CellRendering::Deleted("2".into()),
            CellRendering::Deleted("Sam".into()),
        ]
    );
    assert_eq!(diff.rows[0].changed_indicator(), "No");
    assert_eq!(diff.rows[1].changed_indicator(), "Yes");
}

#[test]
fn test_inserted_row_columns_become_visible() {
    let old = table("old.csv", &["ID", "A", "B", "C"], vec![vec!["1", "x", "y", "z"]]);
    let new = table(
        "new.csv",
        &["ID", "A", "B", "C"],
        vec![vec!["1", "x", "y", "z"], vec!["2", "", "  ", "w"]],
    );
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert_eq!(diff.rows[1].status, RowDiffStatus::Inserted);
    assert_eq!(diff.visible_columns.iter().copied().collect::<Vec<_>>(), vec![0, 3]);
    assert_eq!(diff.rows[1].cells[1], CellRendering::Blank);
    assert_eq!(diff.rows[1].cells[2], CellRendering::Blank);
}

#[test]
fn test_identifier_column_always_visible() {
    let old = table("old.csv", &["Name", "ID"], vec![vec!["Tom", "1"]]);
    let new = table("new.csv", &["Name", "ID"], vec![vec!["Tim", "1"]]);
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert!(diff.is_column_visible(0));
    assert!(diff.is_column_visible(1));
    assert_eq!(diff.rows[0].status, RowDiffStatus::Modified);
    assert_eq!(
        diff.rows[0].cells[0],
        CellRendering::Segments(vec![
            DiffSegment::Equal("T".into()),
            DiffSegment::Deleted("o".into()),
            DiffSegment::Inserted("i".into()),
            DiffSegment::Equal("m".into()),
        ])
    );
}

#[test]
fn test_identical_tables_report_no_differences() {
    let old = table(
        "old.csv",
        &["ID", "Name", "Notes"],
        vec![
            vec!["1", "Tom", "*. first\n*. second"],
            vec!["2", "Sam", ""],
            vec!["3", "", " "],
        ],
    );
    let new = old.clone();
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert!(!diff.has_changes());
    assert_eq!(diff.stats.unchanged, 3);
    assert_eq!(diff.stats.report(), vec!["No differences found."]);
    assert!(diff.rows.iter().all(|r| r.status == RowDiffStatus::Unchanged));
    assert_eq!(diff.hidden_rows.len(), 3);
    assert_eq!(
        diff.rows[0].cells[2],
        CellRendering::Plain("\u{2022} first\n\u{2022} second".into())
    );
}

#[test]
fn test_whitespace_only_change_is_not_a_difference() {
    let old = table("old.csv", &["ID", "Notes"], vec![vec!["1", ""]]);
    let new = table("new.csv", &["ID", "Notes"], vec![vec!["1", "   "]]);
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert_eq!(diff.rows[0].status, RowDiffStatus::Unchanged);
    assert_eq!(diff.rows[0].cells[1], CellRendering::Blank);
    assert!(!diff.is_column_visible(1));
}

#[test]
fn test_duplicate_key_compares_later_row() {
    let old = table(
        "old.csv",
        &["ID", "Name"],
        vec![vec!["5", "early"], vec!["5", "late"]],
    );
    let new = table("new.csv", &["ID", "Name"], vec![vec!["5", "late"]]);
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert_eq!(diff.rows.len(), 1);
    assert_eq!(diff.rows[0].status, RowDiffStatus::Unchanged);
}

#[test]
fn test_numeric_identifiers_are_normalized() {
    let old = table("old.xls", &["ID", "Name"], vec![vec!["7.0", "a"], vec!["8.5", "b"]]);
    let new = table("new.xlsx", &["ID", "Name"], vec![vec!["7", "a"], vec!["8", "b"]]);
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert_eq!(diff.rows.len(), 2);
    assert!(!diff.has_changes());
    assert_eq!(diff.rows[0].cells[0], CellRendering::Plain("7".into()));

    let verbatim = Config::default().with_normalize_ids(false);
    let diff = compute_diff(&old, &new, &verbatim).unwrap();
    assert_eq!(diff.stats.inserted, 2);
    assert_eq!(diff.stats.deleted, 2);
}

#[test]
fn test_schema_reconciliation() {
    let old = table("old.csv", &["ID", "A", "B", "C"], vec![vec!["1", "a", "b", "c"]]);
    let new = table("new.csv", &["ID", "D", "C", "B"], vec![vec!["1", "d", "c", "b"]]);
    let diff = compute_diff(&old, &new, &Config::default()).unwrap();

    assert_eq!(diff.header.columns().collect::<Vec<_>>(), vec!["ID", "B", "C"]);
    assert_eq!(diff.rows[0].cells.len(), 3);
    assert_eq!(diff.rows[0].status, RowDiffStatus::Unchanged);
    assert_eq!(
        diff.header.notices(),
        vec!["Columns in old but not new: A", "Columns in new but not old: D"]
    );
}

#[test]
fn test_width_cap_applies() {
    let long = "x".repeat(200);
    let old = table("old.csv", &["ID", "Text"], vec![vec!["1", long.as_str()]]);
    let new = old.clone();
    let config = Config::default().with_col_width_max(30);
    let diff = compute_diff(&old, &new, &config).unwrap();

    assert_eq!(diff.header.common["Text"], 30);
    assert_eq!(diff.header.common["ID"], 2);
}

#[test]
fn test_missing_identifier_column() {
    let old = table("old.csv", &["Key", "Name"], vec![vec!["1", "Tom"]]);
    let new = people_new();
    let err = compute_diff(&old, &new, &Config::default()).unwrap_err();

    assert!(matches!(err, CompareError::ColumnNotFound { .. }));
    assert_eq!(err.to_string(), "Column ID not found in old.csv");

    let err = compute_diff(&people_old(), &old, &Config::default()).unwrap_err();
    assert_eq!(err.to_string(), "Column ID not found in old.csv");
}

#[test]
fn test_custom_identifier_column() {
    let old = table("old.csv", &["Key", "Name"], vec![vec!["a", "Tom"]]);
    let new = table("new.csv", &["Key", "Name"], vec![vec!["a", "Tim"]]);
    let engine = DiffEngine::new(Config::default().with_id_column("Key"));
    let diff = engine.diff(&old, &new).unwrap();

    assert_eq!(diff.stats.modified, 1);
    assert_eq!(diff.id_column, "Key");
}

#[test]
fn test_disjoint_data_columns_and_empty_tables() {
    let old = table("old.csv", &["ID", "A"], vec![vec!["1", "a"]]);
    let new = table("new.csv", &["B", "ID"], vec![vec!["b", "1"]]);
    let config = Config::default();
    let diff = compute_diff(&old, &new, &config).unwrap();
    assert_eq!(diff.header.columns().collect::<Vec<_>>(), vec!["ID"]);

    let old = table("old.csv", &["ID"], vec![]);
    let new = table("new.csv", &["ID"], vec![]);
    let diff = compute_diff(&old, &new, &config).unwrap();
    assert!(diff.rows.is_empty());
    assert_eq!(diff.stats.report(), vec!["No differences found."]);
}

#[test]
fn test_segments_round_trip_through_engine() {
    let pairs = [
        ("The quick brown fox", "The quick red fox jumps"),
        ("*. item one", "*. item 1"),
        ("abc", "cab"),
    ];
    for (a, b) in pairs {
        let old = table("old.csv", &["ID", "Text"], vec![vec!["1", a]]);
        let new = table("new.csv", &["ID", "Text"], vec![vec!["1", b]]);
        let diff = compute_diff(&old, &new, &Config::default()).unwrap();

        let CellRendering::Segments(segments) = &diff.rows[0].cells[1] else {
            panic!("expected segments for {:?} -> {:?}", a, b);
        };
        let old_side: String = segments
            .iter()
            .filter(|s| !matches!(s, DiffSegment::Inserted(_)))
            .map(DiffSegment::text)
            .collect();
        let new_side: String = segments
            .iter()
            .filter(|s| !matches!(s, DiffSegment::Deleted(_)))
            .map(DiffSegment::text)
            .collect();
        assert_eq!(old_side, a.replace("*. ", "\u{2022} "));
        assert_eq!(new_side, b.replace("*. ", "\u{2022} "));
    }
}
