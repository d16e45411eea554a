use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use roster_client::Operation;
use roster_test_utils::generators::{arb_records, arb_valid_fields};
use roster_test_utils::{sample_records, MockRecordStore, Record, RecordFields};
use roster_tui::config::{ThemeConfig, TuiConfig};
use roster_tui::keys::{map_key, Action, InputMode};
use roster_tui::state::{App, ReloadTrigger};
use roster_tui::view_model::{project, TableView};
use std::io::Write;
use std::time::Duration;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "https://script.example.com/macros/s/abc/exec".to_string(),
        request_timeout_ms: 10_000,
        refresh_interval_ms: 30_000,
        notification_ttl_ms: 5_000,
        tick_rate_ms: 250,
        log_path: "tmp/roster-tui.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

const SAMPLE_TOML: &str = r#"
api_base_url = "http://localhost:8080/exec"
request_timeout_ms = 10000
refresh_interval_ms = 30000
notification_ttl_ms = 5000
tick_rate_ms = 250
log_path = "tmp/roster.log"

[theme]
name = "synthbrute"
"#;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[test]
fn config_base_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_http_url() {
    let mut config = base_config();
    config.api_base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.api_base_url = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_theme_name() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "unknown".to_string(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_TOML.as_bytes()).unwrap();
    let config = TuiConfig::from_path(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    assert_eq!(config.notification_ttl(), Duration::from_secs(5));
}

#[test]
fn config_rejects_unknown_fields() {
    let contents = format!("extra = true\n{}", SAMPLE_TOML);
    assert!(TuiConfig::from_toml(&contents).is_err());
}

#[test]
fn startup_then_periodic_reload_is_serialized() {
    runtime().block_on(async {
        let store = MockRecordStore::with_records(sample_records());
        let mut app = App::new(store.clone(), Duration::from_secs(5));
        app.reload(ReloadTrigger::Startup).await;
        app.reload(app.periodic_trigger()).await;
        assert_eq!(store.count_of(Operation::List), 2);
        assert!(!app.loading);
    });
}

proptest! {
    // Rendering N records shows exactly N rows in server order.
    #[test]
    fn projection_preserves_count_and_order(records in arb_records(20)) {
        let view = project(&records, false);
        if records.is_empty() {
            prop_assert_eq!(view, TableView::Empty);
        } else {
            let rows = view.rows();
            prop_assert_eq!(rows.len(), records.len());
            for (row, record) in rows.iter().zip(records.iter()) {
                prop_assert_eq!(&row.id, &record.id.to_string());
                prop_assert_eq!(&row.email, &record.email);
                prop_assert_eq!(&row.phone, &record.phone.clone().unwrap_or_default());
            }
        }
    }

    #[test]
    fn loading_projection_never_has_rows(records in arb_records(5)) {
        prop_assert!(project(&records, true).rows().is_empty());
    }

    // A successful create is followed by exactly one reload.
    #[test]
    fn create_triggers_single_reload(fields in arb_valid_fields()) {
        runtime().block_on(async {
            let store = MockRecordStore::new();
            let mut app = App::new(store.clone(), Duration::from_secs(5));
            app.open_add_form();
            let form = app.add_form.as_mut().unwrap();
            form.name = fields.name.clone();
            form.email = fields.email.clone();
            form.phone = fields.phone.clone();
            app.submit_add().await;
            prop_assert_eq!(store.count_of(Operation::Create), 1);
            prop_assert_eq!(store.count_of(Operation::List), 1);
            prop_assert_eq!(app.records.len(), 1);
            Ok(())
        })?;
    }

    // Empty name or email never reaches the store.
    #[test]
    fn blank_required_field_never_sent(blank_name in any::<bool>(), ws in "[ ]{0,3}") {
        runtime().block_on(async {
            let store = MockRecordStore::new();
            let mut app = App::new(store.clone(), Duration::from_secs(5));
            app.open_add_form();
            let fields = if blank_name {
                RecordFields { name: ws.clone(), email: "a@x.com".to_string(), phone: String::new() }
            } else {
                RecordFields { name: "A".to_string(), email: ws.clone(), phone: String::new() }
            };
            let form = app.add_form.as_mut().unwrap();
            form.name = fields.name;
            form.email = fields.email;
            app.submit_add().await;
            prop_assert_eq!(store.call_count(), 0);
            Ok(())
        })?;
    }

    // Closing a modal, by any route, clears its pending target.
    #[test]
    fn closing_modal_clears_pending(route in 0u8..3, delete in any::<bool>()) {
        runtime().block_on(async {
            let store = MockRecordStore::with_records(vec![Record::new(1, "A", "a@x.com")]);
            let mut app = App::new(store.clone(), Duration::from_secs(5));
            app.reload(ReloadTrigger::Startup).await;
            store.clear_calls();
            if delete {
                app.open_delete_modal();
            } else {
                app.open_edit_modal();
            }
            match route {
                0 => app.close_modals(),
                1 => { app.dispatch(Action::Cancel).await; }
                _ => {
                    if delete { app.close_delete_modal() } else { app.close_edit_modal() }
                }
            }
            prop_assert!(app.pending_delete().is_none());
            prop_assert!(app.pending_edit().is_none());
            prop_assert_eq!(app.input_mode(), InputMode::Browse);
            prop_assert_eq!(store.call_count(), 0);
            Ok(())
        })?;
    }

    #[test]
    fn form_mode_captures_every_printable_char(c in proptest::char::range('!', '~')) {
        prop_assert_eq!(map_key(press(KeyCode::Char(c)), InputMode::Form), Some(Action::Input(c)));
    }
}
