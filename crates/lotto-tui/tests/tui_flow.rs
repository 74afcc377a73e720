// Drives the real app loop through the TUI's key handling and view state,
// without a terminal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use lotto_core::app::{self, AppState};
use lotto_core::config::parse_config;
use lotto_core::draw::DrawController;
use lotto_core::form::{FormTransport, SubmitOutcome};
use lotto_core::page::Page;
use lotto_core::protocol::{UiUpdate, UserCommand};
use lotto_tui::tui::{apply_ui_update, input, ViewState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

struct AcceptAll;

#[async_trait]
impl FormTransport for AcceptAll {
    async fn post_form(&self, _endpoint: &str, _fields: &[(String, String)]) -> SubmitOutcome {
        Ok(())
    }
}

struct Driver {
    view: ViewState,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
}

impl Driver {
    fn start() -> Self {
        let config = parse_config(
            r#"
[form]
action = "https://forms.example.test/f/abc"
fields = ["name", "email"]
"#,
        )
        .unwrap();
        let page = Page::build(&config);
        let draws = DrawController::new(StdRng::seed_from_u64(9), config.draw.stagger());
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (ui_tx, ui_rx) = mpsc::channel(64);

        let mut state = AppState::new(config, page, draws, Arc::new(AcceptAll), outcome_tx);
        state.start(chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        tokio::spawn(app::run(cmd_rx, outcome_rx, ui_tx, state));

        Driver {
            view: ViewState::default(),
            cmd_tx,
            ui_rx,
        }
    }

    async fn pump(&mut self) {
        let update = tokio::time::timeout(Duration::from_secs(5), self.ui_rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("ui channel closed");
        apply_ui_update(&mut self.view, update, Instant::now());
    }

    /// Press a key; returns whether it produced a command.
    async fn press(&mut self, code: KeyCode) -> bool {
        let event = KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        match input::handle_key(event, &mut self.view) {
            Some(cmd) => {
                self.cmd_tx.send(cmd).await.unwrap();
                true
            }
            None => false,
        }
    }

    fn field(&self, index: usize) -> String {
        self.view.snapshot.as_ref().unwrap().page.partner_form.as_ref().unwrap().fields()[index]
            .value
            .clone()
    }

    fn status(&self) -> String {
        self.view
            .snapshot
            .as_ref()
            .unwrap()
            .page
            .form_status
            .as_ref()
            .unwrap()
            .text()
            .to_string()
    }
}

#[tokio::test]
async fn first_snapshot_shows_round_one_and_starts_reveal() {
    let mut driver = Driver::start();
    driver.pump().await;
    assert_eq!(driver.view.round(), 1);
    assert!(driver.view.revealed_at.is_some());
    let page = &driver.view.snapshot.as_ref().unwrap().page;
    assert_eq!(page.numbers.as_ref().unwrap().balls().len(), 6);
    assert_eq!(page.updated_at.as_ref().unwrap().text(), "2026-10-19");
}

#[tokio::test]
async fn generate_key_advances_round() {
    let mut driver = Driver::start();
    driver.pump().await;
    assert!(driver.press(KeyCode::Char('g')).await);
    driver.pump().await;
    assert_eq!(driver.view.round(), 2);
}

#[tokio::test]
async fn typing_then_enter_submits_and_clears_form() {
    let mut driver = Driver::start();
    driver.pump().await;

    assert!(!driver.press(KeyCode::Char('f')).await);
    for c in "Kim".chars() {
        assert!(driver.press(KeyCode::Char(c)).await);
        driver.pump().await;
    }
    assert_eq!(driver.field(0), "Kim");

    assert!(driver.press(KeyCode::Enter).await);
    // Sending snapshot, then the settled one.
    driver.pump().await;
    driver.pump().await;

    assert_eq!(driver.field(0), "");
    assert_eq!(driver.status(), "문의가 접수되었습니다. 감사합니다!");
    assert!(driver
        .view
        .snapshot
        .as_ref()
        .unwrap()
        .page
        .submit_button
        .as_ref()
        .unwrap()
        .is_enabled());
}

#[tokio::test]
async fn quit_confirmed_closes_ui_channel() {
    let mut driver = Driver::start();
    driver.pump().await;
    assert!(!driver.press(KeyCode::Char('q')).await);
    assert!(driver.view.confirm_quit);
    assert!(driver.press(KeyCode::Char('y')).await);

    let closed = tokio::time::timeout(Duration::from_secs(5), driver.ui_rx.recv())
        .await
        .expect("app loop did not stop");
    assert!(closed.is_none());
}
