use modal_input::{
    ActionKind, Direction, InputDispatcher, KeyCode, KeyEvent, Mode, ModeIntent, Operator,
    PanelLinks, VimCommand,
};

mod support;
use support::handlers::{CommandLog, FailingHandler, RecordingHandler};

fn key(c: char) -> KeyEvent {
    KeyEvent::char(c)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::ctrl(c)
}

fn esc() -> KeyEvent {
    KeyEvent::code(KeyCode::Esc)
}

/// Dispatcher with two side-by-side panels, focus on "request", and a
/// recording handler on each.
fn two_panel_session() -> (InputDispatcher, CommandLog, CommandLog) {
    let mut dispatcher = InputDispatcher::new();
    dispatcher
        .panels_mut()
        .register("request", PanelLinks::new().right("response"));
    dispatcher
        .panels_mut()
        .register("response", PanelLinks::new().left("request"));

    let request_log = CommandLog::new();
    let response_log = CommandLog::new();
    dispatcher.register_component_handler("request", RecordingHandler::new(&request_log));
    dispatcher.register_component_handler("response", RecordingHandler::new(&response_log));
    assert!(dispatcher.set_active_panel(Some("request")));
    (dispatcher, request_log, response_log)
}

#[test]
fn count_operator_sequence_produces_one_command() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    assert!(dispatcher.process(key('3'))); // count
    assert!(!dispatcher.process(key('d'))); // mid-operator, nothing yet
    assert_eq!(dispatcher.pending_operator(), Some(Operator::Delete));
    assert!(dispatcher.process(key('d'))); // completes 3dd

    let commands = request_log.take();
    assert_eq!(
        commands,
        vec![VimCommand::Action {
            kind: ActionKind::DeleteLine,
            count: 3,
        }]
    );
    assert_eq!(dispatcher.machine().command_buffer(), "");
    assert_eq!(dispatcher.machine().count(), 0);
    assert_eq!(dispatcher.pending_operator(), None);
}

#[test]
fn abandoned_operator_does_not_leak() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    assert!(!dispatcher.process(key('d')));
    assert!(dispatcher.process(key('x')));

    let commands = request_log.take();
    assert_eq!(
        commands,
        vec![VimCommand::Action {
            kind: ActionKind::DeleteChar,
            count: 1,
        }]
    );
    assert_eq!(dispatcher.pending_operator(), None);
}

#[test]
fn escape_discards_pending_operator_and_count() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    dispatcher.process(key('3'));
    dispatcher.process(key('d'));
    assert!(dispatcher.process(esc()));
    assert_eq!(dispatcher.pending_operator(), None);
    assert_eq!(dispatcher.machine().count(), 0);

    dispatcher.process(key('d'));
    dispatcher.process(key('d'));
    assert_eq!(
        request_log.take(),
        vec![VimCommand::Action {
            kind: ActionKind::DeleteLine,
            count: 1,
        }]
    );
}

#[test]
fn motions_carry_counts() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    dispatcher.process(key('2'));
    dispatcher.process(key('j'));
    dispatcher.process(key('k'));

    assert_eq!(
        request_log.take(),
        vec![
            VimCommand::Motion {
                direction: Direction::Down,
                count: 2,
            },
            VimCommand::Motion {
                direction: Direction::Up,
                count: 1,
            },
        ]
    );
}

#[test]
fn yank_and_paste_commands() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    dispatcher.process(key('y'));
    dispatcher.process(key('y'));
    dispatcher.process(key('2'));
    dispatcher.process(key('p'));

    assert_eq!(
        request_log.take(),
        vec![
            VimCommand::Action {
                kind: ActionKind::Yank,
                count: 1,
            },
            VimCommand::Action {
                kind: ActionKind::Paste,
                count: 2,
            },
        ]
    );
}

#[test]
fn ctrl_navigation_moves_focus() {
    let (mut dispatcher, _, response_log) = two_panel_session();

    assert!(dispatcher.process(ctrl('l')));
    assert_eq!(dispatcher.active_panel(), Some("response"));
    // The newly focused panel is told about the arrival
    assert_eq!(
        response_log.take(),
        vec![VimCommand::Navigation {
            direction: Direction::Right,
            target: Some("response".to_string()),
        }]
    );

    assert!(dispatcher.process(ctrl('h')));
    assert_eq!(dispatcher.active_panel(), Some("request"));
}

#[test]
fn ctrl_navigation_without_neighbor_is_consumed() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    // "request" has no left neighbor
    assert!(dispatcher.process(ctrl('h')));
    assert_eq!(dispatcher.active_panel(), Some("request"));
    assert!(request_log.is_empty());

    // No active panel at all: still consumed
    dispatcher.set_active_panel(None);
    assert!(dispatcher.process(ctrl('j')));
    assert_eq!(dispatcher.active_panel(), None);
}

#[test]
fn bare_backspace_in_normal_mode_navigates_left() {
    let (mut dispatcher, _, _) = two_panel_session();
    dispatcher.set_active_panel(Some("response"));

    assert!(dispatcher.process(KeyEvent::code(KeyCode::Backspace)));
    assert_eq!(dispatcher.active_panel(), Some("request"));

    dispatcher.set_active_panel(Some("response"));
    assert!(dispatcher.process(KeyEvent::code(KeyCode::Delete)));
    assert_eq!(dispatcher.active_panel(), Some("request"));
}

#[test]
fn backspace_outside_normal_mode_is_not_navigation() {
    let (mut dispatcher, _, _) = two_panel_session();
    dispatcher.set_active_panel(Some("response"));
    dispatcher.process(key('i'));
    assert_eq!(dispatcher.machine().mode(), Mode::Insert);

    // In insert mode backspace is text editing, handled by the host
    assert!(!dispatcher.process(KeyEvent::code(KeyCode::Backspace)));
    assert_eq!(dispatcher.active_panel(), Some("response"));
}

#[test]
fn insert_transitions_carry_intents() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    assert!(dispatcher.process(key('i')));
    assert_eq!(dispatcher.machine().mode(), Mode::Insert);
    assert_eq!(dispatcher.machine().previous_mode(), Mode::Normal);
    assert_eq!(
        request_log.take(),
        vec![VimCommand::ModeChange {
            from: Mode::Normal,
            to: Mode::Insert,
            intent: Some(ModeIntent::InsertHere),
        }]
    );

    // Typing passes through as raw text
    assert!(!dispatcher.process(key('x')));
    assert!(request_log.is_empty());

    assert!(dispatcher.process(esc()));
    assert_eq!(dispatcher.machine().mode(), Mode::Normal);
    assert_eq!(dispatcher.machine().previous_mode(), Mode::Insert);
}

#[test]
fn all_insert_entries_have_distinct_intents() {
    for (c, intent) in [
        ('i', ModeIntent::InsertHere),
        ('a', ModeIntent::InsertAfter),
        ('o', ModeIntent::InsertLineBelow),
        ('O', ModeIntent::InsertLineAbove),
        ('I', ModeIntent::InsertLineStart),
        ('A', ModeIntent::InsertLineEnd),
    ] {
        let (mut dispatcher, request_log, _) = two_panel_session();
        assert!(dispatcher.process(key(c)), "key {c:?} not handled");
        assert_eq!(dispatcher.machine().mode(), Mode::Insert);
        assert_eq!(
            request_log.take(),
            vec![VimCommand::ModeChange {
                from: Mode::Normal,
                to: Mode::Insert,
                intent: Some(intent),
            }]
        );
    }
}

#[test]
fn ctrl_c_and_ctrl_bracket_leave_insert() {
    for exit in [ctrl('c'), ctrl('[')] {
        let (mut dispatcher, _, _) = two_panel_session();
        dispatcher.process(key('i'));
        assert!(dispatcher.process(exit));
        assert_eq!(dispatcher.machine().mode(), Mode::Normal);
    }
}

#[test]
fn visual_mode_keys_and_toggle() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    assert!(dispatcher.process(key('v')));
    assert_eq!(dispatcher.machine().mode(), Mode::Visual);
    request_log.take();

    // Motions still dispatch to the panel in visual mode
    dispatcher.process(key('2'));
    dispatcher.process(key('l'));
    assert_eq!(
        request_log.take(),
        vec![VimCommand::Motion {
            direction: Direction::Right,
            count: 2,
        }]
    );

    // V switches to line-wise without leaving visual
    assert!(dispatcher.process(key('V')));
    assert_eq!(dispatcher.machine().mode(), Mode::Visual);
    assert_eq!(
        request_log.take(),
        vec![VimCommand::ModeChange {
            from: Mode::Visual,
            to: Mode::Visual,
            intent: Some(ModeIntent::VisualLine),
        }]
    );

    // v toggles back to normal
    assert!(dispatcher.process(key('v')));
    assert_eq!(dispatcher.machine().mode(), Mode::Normal);
    assert_eq!(dispatcher.machine().previous_mode(), Mode::Visual);
}

#[test]
fn no_active_panel_leaves_commands_unhandled() {
    let (mut dispatcher, request_log, _) = two_panel_session();
    dispatcher.set_active_panel(None);

    assert!(!dispatcher.process(key('x')));
    assert!(request_log.is_empty());
}

#[test]
fn no_registered_handler_leaves_commands_unhandled() {
    let (mut dispatcher, _, _) = two_panel_session();
    dispatcher.unregister_component_handler("request");

    assert!(!dispatcher.process(key('x')));
}

#[test]
fn handlers_run_in_registration_order_past_failures() {
    let mut dispatcher = InputDispatcher::new();
    dispatcher.panels_mut().register("request", PanelLinks::new());
    let log = CommandLog::new();
    dispatcher.register_component_handler("request", FailingHandler);
    dispatcher.register_component_handler("request", RecordingHandler::new(&log));
    dispatcher.set_active_panel(Some("request"));

    assert!(dispatcher.process(key('x')));

    // The failing handler did not stop the second one
    assert_eq!(log.len(), 1);
    let errors = dispatcher.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].mode, Mode::Normal);
    assert_eq!(errors[0].input, "x");
    assert_eq!(errors[0].panel.as_deref(), Some("request"));
    assert_eq!(errors[0].message, "handler exploded");

    // Drained
    assert!(dispatcher.take_errors().is_empty());
}

#[test]
fn handler_failure_leaves_dispatcher_state_intact() {
    let mut dispatcher = InputDispatcher::new();
    dispatcher.panels_mut().register("request", PanelLinks::new());
    dispatcher.register_component_handler("request", FailingHandler);
    dispatcher.set_active_panel(Some("request"));

    assert!(dispatcher.process(key('x')));
    assert_eq!(dispatcher.active_panel(), Some("request"));
    assert_eq!(dispatcher.pending_operator(), None);
    assert_eq!(dispatcher.machine().mode(), Mode::Normal);
}

#[test]
fn set_active_panel_rejects_unknown_ids() {
    let (mut dispatcher, _, _) = two_panel_session();

    assert!(!dispatcher.set_active_panel(Some("ghost")));
    assert_eq!(dispatcher.active_panel(), Some("request"));

    assert!(dispatcher.set_active_panel(None));
    assert_eq!(dispatcher.active_panel(), None);
}

#[test]
fn leading_zero_is_not_a_count() {
    let (mut dispatcher, request_log, _) = two_panel_session();

    // A lone 0 is left for the host (line-start motion isn't bound here)
    assert!(!dispatcher.process(key('0')));
    assert_eq!(dispatcher.machine().count(), 0);

    // But 0 inside a count works: 10j
    dispatcher.process(key('1'));
    dispatcher.process(key('0'));
    dispatcher.process(key('j'));
    assert_eq!(
        request_log.take(),
        vec![VimCommand::Motion {
            direction: Direction::Down,
            count: 10,
        }]
    );
}

#[test]
fn snapshot_reflects_session_state() {
    let (mut dispatcher, _, _) = two_panel_session();
    dispatcher.process(key('3'));
    dispatcher.process(key('d'));

    let snapshot = dispatcher.snapshot();
    assert_eq!(snapshot.mode, Mode::Normal);
    assert_eq!(snapshot.pending_operator, Some(Operator::Delete));
    assert_eq!(snapshot.pending_count, 3);
    assert_eq!(snapshot.active_panel.as_deref(), Some("request"));
}

#[test]
fn unhandled_keys_fall_through() {
    let (mut dispatcher, _, _) = two_panel_session();
    assert!(!dispatcher.process(key('z')));
    assert!(!dispatcher.process(KeyEvent::code(KeyCode::Enter)));
}
