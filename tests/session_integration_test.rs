// Operator session driven end to end from files on disk

use std::fs;

use tempfile::tempdir;

use callq::app::{Command, Notice, OperatorSession, Reply};
use callq::display::{BoardFormat, ColourManager};
use callq::ingest::{IdentifierSource, IngestError};
use callq::queue::QueueParams;

fn start(source: IdentifierSource, params: QueueParams) -> OperatorSession {
    OperatorSession::start(source, params, ColourManager::with_colours(false), BoardFormat::Text)
        .expect("Failed to start session")
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_session_from_csv_column() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("tickets.csv");
    fs::write(&path, "name,ticket\n\"Lee, Ann\",T-01\nBo,T-02\nCy,\nDi,T-04\n").unwrap();

    let source = IdentifierSource::Table {
        path,
        column: Some("ticket".to_string()),
        delimiter: ',',
    };
    let mut session = start(source, QueueParams::default());

    assert_eq!(session.engine().source(), ids(&["T-01", "T-02", "T-04"]).as_slice());
    assert_eq!(session.engine().active().map(String::as_str), Some("T-01"));

    session.execute(Command::Done);
    session.execute(Command::Skip);
    assert_eq!(session.engine().completed(), ids(&["T-01"]).as_slice());
    assert_eq!(session.engine().skipped(), ids(&["T-02"]).as_slice());
    assert_eq!(session.engine().active().map(String::as_str), Some("T-04"));
}

#[test]
fn test_session_rejects_empty_list() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("empty.txt");
    fs::write(&path, "\n  \n").unwrap();

    let result = OperatorSession::start(
        IdentifierSource::Lines { path },
        QueueParams::default(),
        ColourManager::with_colours(false),
        BoardFormat::Text,
    );
    assert!(matches!(result, Err(IngestError::NoIdentifiers(_))));
}

#[test]
fn test_restart_picks_up_edited_source() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("queue.txt");
    fs::write(&path, "A1\nA2\n").unwrap();

    let mut session = start(IdentifierSource::Lines { path: path.clone() }, QueueParams::default());
    session.execute(Command::Done);

    fs::write(&path, "B1\nB2\nB3\n").unwrap();
    session.execute(Command::Restart);

    assert_eq!(session.engine().source(), ids(&["B1", "B2", "B3"]).as_slice());
    assert_eq!(session.engine().active().map(String::as_str), Some("B1"));
    assert!(session.engine().completed().is_empty());
}

#[test]
fn test_failed_restart_keeps_queue() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("queue.txt");
    fs::write(&path, "A1\nA2\nA3\n").unwrap();

    let mut session = start(IdentifierSource::Lines { path: path.clone() }, QueueParams::default());
    session.execute(Command::Skip);
    let session_id = session.session_id().to_string();
    let before = session.engine().snapshot();

    fs::remove_file(&path).unwrap();
    let reply = session.execute(Command::Restart);

    assert!(matches!(reply, Reply::Board(Some(Notice::Error(_)))));
    assert_eq!(session.engine().snapshot(), before);
    assert_eq!(session.session_id(), session_id);
}

#[test]
fn test_transcript_with_small_window() {
    let source = IdentifierSource::Inline((1..=12).map(|i| i.to_string()).collect());
    let params = QueueParams::new(4, 2, 3).unwrap();
    let mut session = start(source, params);

    let input = "done\ndone\nskip\nnext\nrecall 1\nshow\ndone\ndone\n";
    let mut output = Vec::new();
    session.run(input.as_bytes(), &mut output).unwrap();

    // 1 and 2 completed, 3 skipped then recalled, next refused while 4 was active
    let engine = session.engine();
    assert_eq!(engine.completed(), ids(&["1", "2", "4", "3"]).as_slice());
    assert!(engine.skipped().is_empty());
    assert_eq!(engine.active().map(String::as_str), Some("5"));

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("4 is still active"));
    assert!(text.contains("Now calling"));
}
