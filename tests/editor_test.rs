//! Editor sessions driven through commands, as an application would

use mindgraph::{Command, Editor, EditorConfig, EditorError, GraphError, Mode, Scope};
use tempfile::TempDir;

/// Root plus `count` children, the last child active
fn session(count: usize) -> Editor {
    let mut editor = Editor::default();
    let root = editor.store().root().unwrap();
    for i in 0..count {
        editor.execute(Command::Select(root)).unwrap();
        editor.execute(Command::InsertChild).unwrap();
        editor.execute(Command::SetContent(format!("child {}", i + 1))).unwrap();
        editor.execute(Command::Cancel).unwrap();
    }
    editor
}

#[test]
fn test_hint_mode_narrows_then_resolves() {
    let mut editor = session(12);

    editor.execute(Command::HintToggle).unwrap();
    assert_eq!(editor.hint().candidates().len(), 13);
    assert_eq!(editor.hint().best_candidate(), Some(0));

    editor.execute(Command::HintDigit(1)).unwrap();
    assert_eq!(editor.hint().candidates(), &[1, 10, 11, 12]);
    assert_eq!(editor.hint().best_candidate(), Some(1));

    editor.execute(Command::HintDigit(0)).unwrap();
    assert!(!editor.hint().is_active());

    let active = editor.store().active_node().unwrap();
    assert_eq!(editor.store().index_of(active), Some(10));
    assert_eq!(editor.store().get_node(active).unwrap().content, "child 10");
}

#[test]
fn test_hint_backspace_then_enter() {
    let mut editor = session(12);

    editor.execute(Command::HintToggle).unwrap();
    editor.execute(Command::HintDigit(1)).unwrap();
    editor.execute(Command::HintBackspace).unwrap();
    assert_eq!(editor.hint().buffer(), "");
    assert!(editor.hint().is_active());

    editor.execute(Command::HintDigit(1)).unwrap();
    editor.execute(Command::HintConfirm).unwrap();
    assert_eq!(editor.store().active_node(), editor.store().node_at(1));
}

#[test]
fn test_hint_escape() {
    let mut editor = session(3);
    let before = editor.store().active_node();

    editor.execute(Command::HintToggle).unwrap();
    editor.execute(Command::Cancel).unwrap();

    assert!(!editor.hint().is_active());
    assert_eq!(editor.store().active_node(), before);
}

#[test]
fn test_link_through_hint_mode() {
    let mut editor = session(2);
    let first = editor.store().node_at(1).unwrap();
    let second = editor.store().node_at(2).unwrap();

    editor.execute(Command::Select(second)).unwrap();
    editor.execute(Command::EnterEdgeAddMode).unwrap();
    editor.execute(Command::HintToggle).unwrap();
    let feedback = editor.execute(Command::HintDigit(1)).unwrap();

    assert_eq!(
        feedback.to_string(),
        "The graph is acyclic, edge added as secondary edge."
    );
    assert!(editor.store().find_edge(second, first).unwrap().secondary);
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn test_failed_command_changes_nothing() {
    let mut editor = session(2);
    let before = mindgraph::persistence::save(editor.store());

    editor.execute(Command::Select(editor.store().root().unwrap())).unwrap();
    let err = editor.execute(Command::DeleteNode(Scope::Node)).unwrap_err();
    assert!(matches!(err, EditorError::Graph(GraphError::RootProtected)));

    assert_eq!(mindgraph::persistence::save(editor.store()), before);
}

#[test]
fn test_insert_off_canvas_reports_message() {
    let config = EditorConfig {
        canvas: mindgraph::Rect::new(-150.0, -150.0, 300.0, 300.0),
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config);
    let root = editor.store().root().unwrap();

    // the child lands at (0, -100); its own child would land at (0, -200)
    editor.execute(Command::InsertChild).unwrap();
    let err = editor.execute(Command::InsertChild).unwrap_err();
    assert_eq!(err.to_string(), "New node would be placed outside of the scene");
    assert_eq!(editor.store().node_count(), 2);

    editor.execute(Command::Select(root)).unwrap();
    editor.execute(Command::InsertChild).unwrap();
    assert_eq!(editor.store().node_count(), 3);
}

#[test]
fn test_session_save_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.qmm");

    let mut editor = session(3);
    editor.execute(Command::Select(editor.store().node_at(2).unwrap())).unwrap();
    editor.execute(Command::ScaleUp(Scope::Node)).unwrap();
    editor.execute(Command::Save(Some(path.clone()))).unwrap();

    editor.execute(Command::NewDocument).unwrap();
    assert_eq!(editor.store().node_count(), 1);
    assert_eq!(editor.path(), None);

    editor.execute(Command::Open(path.clone())).unwrap();
    assert_eq!(editor.store().node_count(), 4);
    assert_eq!(editor.path(), Some(path.as_path()));

    let second = editor.store().node_at(2).unwrap();
    assert!((editor.store().get_node(second).unwrap().scale - 1.2).abs() < 1e-9);
}
