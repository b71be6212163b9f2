//! Key-driven flows through the TUI app, without a terminal

use std::time::Duration;

use applock_core::testing::RecordingHost;
use applock_core::{ConfigStore, LockConfig, ManualClock, PasscodeHasher, Severity};
use applock_tui::app::{App, FormStep, JsonConfigStore, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

const T0: u64 = 1_700_000_000_000;

type TestApp<S> = App<S, ManualClock>;

fn app_with<S: ConfigStore>(config: LockConfig, store: S) -> (TestApp<S>, ManualClock) {
    let clock = ManualClock::new(T0);
    let app = App::with_clock(config, store, clock.clone())
        .unwrap()
        .with_hasher(PasscodeHasher::insecure_fast());
    (app, clock)
}

fn registered(passcode: &str) -> LockConfig {
    LockConfig {
        passcode: Some(PasscodeHasher::insecure_fast().hash(passcode).unwrap()),
        ..Default::default()
    }
}

fn press(app: &mut TestApp<impl ConfigStore>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut TestApp<impl ConfigStore>, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_str(app: &mut TestApp<impl ConfigStore>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn submit(app: &mut TestApp<impl ConfigStore>, text: &str) {
    type_str(app, text);
    press(app, KeyCode::Enter);
}

#[test]
fn test_first_run_registration() {
    let (mut app, _) = app_with(LockConfig::default(), RecordingHost::default());
    app.start();
    assert_eq!(app.view(), View::Registration);
    assert!(app.controller.host().is_blurred());

    submit(&mut app, "12");
    assert_eq!(app.view(), View::Registration);
    assert!(app
        .state
        .error_message
        .as_deref()
        .unwrap()
        .contains("at least 4"));

    submit(&mut app, "34");
    assert_eq!(app.state.form.step, FormStep::Confirm);
    assert!(app.state.error_message.is_none());

    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Chat);
    assert!(app.controller.is_registered());
    assert!(!app.controller.host().is_blurred());
    assert_eq!(app.controller.host().store().saved.len(), 1);
}

#[test]
fn test_registration_mismatch_starts_over() {
    let (mut app, _) = app_with(LockConfig::default(), RecordingHost::default());
    app.start();

    submit(&mut app, "1234");
    submit(&mut app, "1235");

    assert_eq!(app.view(), View::Registration);
    assert_eq!(app.state.form.step, FormStep::New);
    assert!(app.state.error_message.is_some());
    assert!(!app.controller.is_registered());
}

#[test]
fn test_skip_registration() {
    let (mut app, _) = app_with(LockConfig::default(), RecordingHost::default());
    app.start();

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view(), View::Chat);
    assert!(!app.should_quit);
    assert!(app
        .controller
        .host()
        .notifications
        .iter()
        .any(|n| n.severity == Severity::Info));

    // The shortcut offers registration again
    ctrl(&mut app, 'l');
    assert_eq!(app.view(), View::Registration);
}

#[test]
fn test_unlock_on_startup() {
    let (mut app, _) = app_with(registered("1234"), RecordingHost::default());
    app.start();
    assert_eq!(app.view(), View::Unlock);

    submit(&mut app, "0000");
    assert_eq!(app.view(), View::Unlock);
    assert_eq!(
        app.state.error_message.as_deref(),
        Some("Incorrect passcode (4 attempts remaining)")
    );
    assert!(app.state.form.current.is_empty());

    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Chat);
    assert!(app.state.error_message.is_none());
}

#[test]
fn test_no_lock_on_startup() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();
    assert_eq!(app.view(), View::Chat);
}

#[test]
fn test_lockout_countdown() {
    let config = LockConfig {
        max_attempts: 2,
        lockout_duration_seconds: 60,
        ..registered("1234")
    };
    let (mut app, clock) = app_with(config, RecordingHost::default());
    app.start();

    submit(&mut app, "0000");
    submit(&mut app, "1111");
    assert_eq!(app.view(), View::Lockout);
    app.on_tick();

    // Submissions are taken but refused, even the right passcode
    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Lockout);
    assert_eq!(
        app.state.error_message.as_deref(),
        Some("Locked out - try again in 1 minute")
    );
    assert_eq!(app.controller.state().attempt_count(), 2);
    assert_eq!(app.controller.lockout_remaining_seconds(), Some(60));

    clock.advance(Duration::from_secs(60));
    app.on_tick();
    assert_eq!(app.view(), View::Unlock);
    assert!(app.state.error_message.is_none());

    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Chat);
}

#[test]
fn test_idle_lock_rearms_on_typing() {
    let config = LockConfig {
        lock_on_startup: false,
        idle_timeout_seconds: 30,
        ..registered("1234")
    };
    let (mut app, clock) = app_with(config, RecordingHost::default());
    app.start();

    clock.advance(Duration::from_secs(29));
    app.on_tick();
    type_str(&mut app, "hi");

    clock.advance(Duration::from_secs(29));
    app.on_tick();
    assert_eq!(app.view(), View::Chat);

    clock.advance(Duration::from_secs(1));
    app.on_tick();
    assert_eq!(app.view(), View::Unlock);
}

#[test]
fn test_shortcut_locks_once() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    type_str(&mut app, "draft");
    ctrl(&mut app, 'l');
    assert_eq!(app.view(), View::Unlock);

    // Second press and command chords do not touch the prompt
    ctrl(&mut app, 'l');
    ctrl(&mut app, 'x');
    assert_eq!(app.state.form.input_len(), 0);

    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Chat);
    assert_eq!(app.state.compose, "draft");
}

#[test]
fn test_custom_shortcut() {
    let config = LockConfig {
        lock_on_startup: false,
        lock_shortcut: "alt+k".parse().unwrap(),
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    ctrl(&mut app, 'l');
    assert_eq!(app.view(), View::Chat);

    app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::ALT));
    assert_eq!(app.view(), View::Unlock);
}

#[test]
fn test_change_passcode() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    ctrl(&mut app, 'p');
    assert_eq!(app.view(), View::ChangePasscode);

    submit(&mut app, "1234");
    submit(&mut app, "abcd");
    submit(&mut app, "abcd");
    assert_eq!(app.view(), View::Chat);
    assert!(app
        .controller
        .host()
        .notifications
        .iter()
        .any(|n| n.message.starts_with("Passcode changed")));

    ctrl(&mut app, 'l');
    submit(&mut app, "1234");
    assert_eq!(app.view(), View::Unlock);
    submit(&mut app, "abcd");
    assert_eq!(app.view(), View::Chat);
}

#[test]
fn test_change_passcode_wrong_current() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    ctrl(&mut app, 'p');
    submit(&mut app, "9999");
    submit(&mut app, "abcd");
    submit(&mut app, "abcd");

    assert_eq!(app.view(), View::ChangePasscode);
    assert_eq!(app.state.form.step, FormStep::Current);
    assert_eq!(app.controller.state().attempt_count(), 1);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view(), View::Chat);
}

#[test]
fn test_change_passcode_mismatch_starts_over() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    ctrl(&mut app, 'p');
    submit(&mut app, "1234");
    submit(&mut app, "abcd");
    submit(&mut app, "abce");

    assert_eq!(app.view(), View::ChangePasscode);
    assert_eq!(app.state.form.step, FormStep::Current);
    assert_eq!(
        app.state.error_message.as_deref(),
        Some("Passcodes do not match")
    );
    // Mismatch is caught before the current passcode is checked
    assert_eq!(app.controller.state().attempt_count(), 0);
}

#[test]
fn test_change_passcode_lockout_locks_app() {
    let config = LockConfig {
        lock_on_startup: false,
        max_attempts: 1,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    ctrl(&mut app, 'p');
    submit(&mut app, "9999");
    submit(&mut app, "abcd");
    submit(&mut app, "abcd");

    assert_eq!(app.view(), View::Lockout);
}

#[test]
fn test_esc_on_unlock_quits() {
    let (mut app, _) = app_with(registered("1234"), RecordingHost::default());
    app.start();
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit);
}

#[test]
fn test_chat_compose_and_send() {
    let config = LockConfig {
        lock_on_startup: false,
        ..registered("1234")
    };
    let (mut app, _) = app_with(config, RecordingHost::default());
    app.start();

    submit(&mut app, "hello there");
    let last = app.state.messages.last().unwrap();
    assert_eq!(last.body, "hello there");
    assert!(last.own);
}

#[test]
fn test_passcode_persists_across_restarts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let (mut app, _) = app_with(LockConfig::default(), JsonConfigStore::new(&path));
    app.start();
    submit(&mut app, "s3cret");
    submit(&mut app, "s3cret");
    assert!(app.controller.is_registered());
    drop(app);

    let store = JsonConfigStore::new(&path);
    let config = store.load().unwrap();
    let (mut app, _) = app_with(config, store);
    app.start();
    assert_eq!(app.view(), View::Unlock);

    submit(&mut app, "s3cret");
    assert_eq!(app.view(), View::Chat);
}
