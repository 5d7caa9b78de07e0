use std::fs;

use quill_core::{
    EditorAction, EditorEngine, EngineError, FsFiles, Position, SaveOutcome,
};
use tempfile::tempdir;

fn open(engine: &mut EditorEngine, path: &std::path::Path) {
    engine.files_mut().select_for_open(path);
    engine.handle_action(EditorAction::Open).unwrap();
}

#[test]
fn test_open_replaces_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "one\r\ntwo\r\nthree").unwrap();

    let mut engine = EditorEngine::new();
    engine.handle_action(EditorAction::TypeCharacter(b'x')).unwrap();
    open(&mut engine, &path);

    let document = engine.document();
    assert_eq!(document.line_count(), 3);
    assert_eq!(document.line(2).unwrap().as_bytes(), b"three");
    assert_eq!(document.cursor(), Position::zero());
    assert_eq!(document.file_name(), Some(path.as_path()));
    assert!(!document.has_unsaved_changes());
}

#[test]
fn test_open_missing_file_leaves_document_untouched() {
    let dir = tempdir().unwrap();
    let mut engine = EditorEngine::new();
    engine.handle_action(EditorAction::TypeCharacter(b'x')).unwrap();

    engine.files_mut().select_for_open(dir.path().join("missing.txt"));
    let err = engine.handle_action(EditorAction::Open).unwrap_err();

    assert!(matches!(err, EngineError::Read { .. }));
    assert_eq!(engine.document().to_crlf_string(), "x");
    assert!(engine.document().has_unsaved_changes());
}

#[test]
fn test_open_without_selection_reports_error() {
    let mut engine = EditorEngine::new();
    let err = engine.open_file().unwrap_err();

    assert!(matches!(err, EngineError::NoFileSelected));
}

#[test]
fn test_save_without_changes_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "keep\r\nme").unwrap();

    let mut engine = EditorEngine::new();
    open(&mut engine, &path);
    fs::write(&path, "changed on disk").unwrap();

    assert_eq!(engine.save().unwrap(), SaveOutcome::Unchanged);
    assert_eq!(fs::read_to_string(&path).unwrap(), "changed on disk");
}

#[test]
fn test_save_rewrites_only_from_dirty_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "one\r\ntwo\r\nthree").unwrap();

    let mut engine = EditorEngine::new();
    open(&mut engine, &path);
    engine.document_mut().set_cursor(Position::new(2, 5));
    engine.handle_action(EditorAction::TypeCharacter(b'!')).unwrap();

    let plan = engine.document().save_plan(&path).unwrap();
    assert_eq!(plan.offset, 10);
    assert_eq!(plan.bytes, b"three!");
    assert!(plan.overwrite);

    engine.handle_action(EditorAction::Save).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\ntwo\r\nthree!");
    assert!(!engine.document().has_unsaved_changes());
}

#[test]
fn test_save_truncates_when_document_shrinks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "one\r\ntwo\r\nthree").unwrap();

    let mut engine = EditorEngine::new();
    open(&mut engine, &path);
    engine.document_mut().set_cursor(Position::new(2, 0));
    engine.document_mut().init_highlight(Position::new(1, 1));
    engine.handle_action(EditorAction::Backspace).unwrap();
    engine.handle_action(EditorAction::Save).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\ntthree");
}

#[test]
fn test_save_writes_one_separator_between_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut engine = EditorEngine::new();
    for action in [
        EditorAction::TypeCharacter(b'a'),
        EditorAction::Newline,
        EditorAction::TypeCharacter(b'b'),
        EditorAction::Newline,
    ] {
        engine.handle_action(action).unwrap();
    }
    engine.files_mut().select_for_save(&path);
    engine.handle_action(EditorAction::Save).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\n");
    assert_eq!(engine.document().file_name(), Some(path.as_path()));
}

#[test]
fn test_lf_file_is_rewritten_whole_with_crlf() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unix.txt");
    fs::write(&path, "a\nb\nc").unwrap();

    let mut engine = EditorEngine::new();
    open(&mut engine, &path);
    engine.document_mut().set_cursor(Position::new(2, 1));
    engine.handle_action(EditorAction::TypeCharacter(b'!')).unwrap();
    engine.handle_action(EditorAction::Save).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a\r\nb\r\nc!");

    engine.handle_action(EditorAction::TypeCharacter(b'?')).unwrap();
    let plan = engine.document().save_plan(&path).unwrap();
    assert_eq!(plan.offset, 6);
}

#[test]
fn test_save_as_writes_whole_document_and_renames() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("a.txt");
    let copy = dir.path().join("nested").join("b.txt");
    fs::write(&original, "one\r\ntwo").unwrap();

    let mut engine = EditorEngine::new();
    open(&mut engine, &original);
    engine.document_mut().set_cursor(Position::new(1, 3));
    engine.handle_action(EditorAction::TypeCharacter(b'!')).unwrap();

    engine.files_mut().select_for_save(&copy);
    let outcome = engine.save_as().unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Written {
            path: copy.clone(),
            bytes: 9
        }
    );
    assert_eq!(fs::read_to_string(&copy).unwrap(), "one\r\ntwo!");
    assert_eq!(fs::read_to_string(&original).unwrap(), "one\r\ntwo");
    assert_eq!(engine.document().file_name(), Some(copy.as_path()));
    assert!(!engine.document().has_unsaved_changes());
}

#[test]
fn test_failed_save_keeps_dirty_mark_and_name() {
    let dir = tempdir().unwrap();
    let mut engine = EditorEngine::new();
    engine.handle_action(EditorAction::TypeCharacter(b'x')).unwrap();

    // A directory cannot be created as a file.
    engine.files_mut().select_for_save(dir.path());
    let err = engine.save().unwrap_err();

    assert!(matches!(err, EngineError::Write { .. }));
    assert!(engine.document().has_unsaved_changes());
    assert_eq!(engine.document().file_name(), None);
}

#[test]
fn test_save_without_target_reports_no_file() {
    let mut engine = EditorEngine::new();
    engine.handle_action(EditorAction::TypeCharacter(b'x')).unwrap();

    let err = engine.save().unwrap_err();
    assert!(matches!(err, EngineError::NoFileSelected));
    assert_eq!(engine.document().dirty_mark(), Some(0));
}

#[test]
fn test_fs_files_picker_hands_out_path_once() {
    use quill_core::FileBridge;

    let mut files = FsFiles::new();
    files.select_for_open("a.txt");

    assert_eq!(files.pick_file_for_open(), Some("a.txt".into()));
    assert_eq!(files.pick_file_for_open(), None);
    assert_eq!(files.pick_file_for_save(), None);
}
