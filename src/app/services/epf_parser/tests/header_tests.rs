//! Tests for EPF header parsing

use super::*;
use crate::Error;
use crate::app::services::epf_parser::header::{HeaderState, parse_header};

#[test]
fn test_header_parsing_complete() {
    init_test_logging();
    let content = format!("{DEMO_HEADER}1\x012\x01three\x02\n");
    let mut source = source_from(content.as_bytes());

    let header = parse_header(&mut source).unwrap();

    assert_eq!(header.fields, vec!["export_date", "id", "name"]);
    assert_eq!(header.primary_key, vec!["id"]);
    assert_eq!(header.types, vec!["BIGINT", "INTEGER", "VARCHAR(200)"]);
    assert_eq!(header.export_mode, ExportMode::Full);
    assert_eq!(header.comment_lines, 0);
    assert!(header.complete);

    // The first data byte must still be available
    assert_eq!(source.next_byte().unwrap(), Some(b'1'));
}

#[test]
fn test_header_without_newlines() {
    let content = b"#a\x01b\x02#pk:a\x02#types:BIGINT\x01BOOLEAN\x02#exportMode:FULL\x027\x011\x02";
    let mut source = source_from(content);

    let header = parse_header(&mut source).unwrap();

    assert_eq!(header.fields, vec!["a", "b"]);
    assert_eq!(header.primary_key, vec!["a"]);
    assert_eq!(header.types, vec!["BIGINT", "BOOLEAN"]);
    assert_eq!(header.export_mode, ExportMode::Full);
    assert_eq!(source.next_byte().unwrap(), Some(b'7'));
}

#[test]
fn test_labels_are_not_validated() {
    let content = b"#x\x02\n#anything at all:x\x02\n#?:TEXT\x02\n#:FULL\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();

    assert_eq!(header.primary_key, vec!["x"]);
    assert_eq!(header.types, vec!["TEXT"]);
    assert_eq!(header.export_mode, ExportMode::Full);
}

#[test]
fn test_export_mode_fallback() {
    for value in ["INCREMENTAL", "full", "", "FULL ", "garbage"] {
        let content = format!("#a\x02\n#pk:a\x02\n#t:TEXT\x02\n#exportMode:{value}\x02\n");
        let header = parse_header(&mut source_from(content.as_bytes())).unwrap();
        assert_eq!(
            header.export_mode,
            ExportMode::Incremental,
            "value {value:?} should fall back to incremental"
        );
    }
}

#[test]
fn test_export_mode_with_separator_is_incremental() {
    let content = b"#a\x02\n#pk:a\x02\n#t:TEXT\x02\n#exportMode:FULL\x01FULL\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();
    assert_eq!(header.export_mode, ExportMode::Incremental);
}

#[test]
fn test_trailing_comments_skipped() {
    let content = format!("{DEMO_HEADER}#dbVersion:1.0\x02\n#note\x01more\x02\n5\x01\x01x\x02\n");
    let mut source = source_from(content.as_bytes());

    let header = parse_header(&mut source).unwrap();

    assert_eq!(header.comment_lines, 2);
    assert_eq!(source.next_byte().unwrap(), Some(b'5'));
}

#[test]
fn test_footer_directly_after_header() {
    let content = format!("{DEMO_HEADER}#recordsWritten:0\x02\n");
    let mut source = source_from(content.as_bytes());

    let header = parse_header(&mut source).unwrap();

    // With no data the footer reads as a trailing comment
    assert_eq!(header.comment_lines, 1);
    assert_eq!(source.next_byte().unwrap(), None);
}

#[test]
fn test_missing_comment_marker_on_first_line() {
    let content = b"export_date\x01id\x02\n";
    let err = parse_header(&mut source_from(content)).unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }));
}

#[test]
fn test_missing_comment_marker_on_types_line() {
    let content = b"#a\x02\n#pk:a\x02\ndbTypes:TEXT\x02\n";
    match parse_header(&mut source_from(content)).unwrap_err() {
        Error::Format { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("column types"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_stream() {
    let header = parse_header(&mut source_from(b"")).unwrap();
    assert!(header.fields.is_empty());
    assert!(header.types.is_empty());
    assert!(!header.complete);
}

#[test]
fn test_truncated_header_is_not_an_error() {
    let content = b"#a\x01b\x02\n#primaryKey:a\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();

    assert_eq!(header.fields, vec!["a", "b"]);
    assert_eq!(header.primary_key, vec!["a"]);
    assert!(header.types.is_empty());
    assert_eq!(header.export_mode, ExportMode::Incremental);
    assert!(!header.complete);
}

#[test]
fn test_empty_primary_key() {
    let content = b"#a\x02\n#primaryKey:\x02\n#t:TEXT\x02\n#exportMode:FULL\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();
    assert!(header.primary_key.is_empty());
}

#[test]
fn test_composite_primary_key_preserves_order() {
    let content = b"#a\x01b\x01c\x02\n#primaryKey:c\x01a\x02\n#t:TEXT\x01TEXT\x01TEXT\x02\n#exportMode:FULL\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();
    assert_eq!(header.primary_key, vec!["c", "a"]);
}

#[test]
fn test_label_without_colon_has_no_values() {
    let content = b"#a\x02\n#primaryKey\x02\n#t:TEXT\x02\n#exportMode:FULL\x02\n";
    let header = parse_header(&mut source_from(content)).unwrap();
    assert!(header.primary_key.is_empty());
    assert_eq!(header.types, vec!["TEXT"]);
}

#[test]
fn test_utf8_field_names() {
    let content = "#název\x01日付\x02\n#pk:název\x02\n#t:TEXT\x01TEXT\x02\n#exportMode:FULL\x02\n";
    let header = parse_header(&mut source_from(content.as_bytes())).unwrap();
    assert_eq!(header.fields, vec!["název", "日付"]);
}

#[test]
fn test_header_state_order() {
    let mut state = HeaderState::Fields;
    let mut visited = vec![state];
    while state != HeaderState::TrailingComment {
        state = state.next();
        visited.push(state);
    }

    assert_eq!(
        visited,
        vec![
            HeaderState::Fields,
            HeaderState::PrimaryKey,
            HeaderState::Types,
            HeaderState::ExportMode,
            HeaderState::TrailingComment,
        ]
    );
    assert_eq!(HeaderState::Done.next(), HeaderState::Done);
}
