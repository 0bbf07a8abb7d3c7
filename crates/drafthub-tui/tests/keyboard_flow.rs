// End-to-end tests: key presses go through `input::handle_key`, commands go
// to the real orchestration task, and its updates come back into the
// ViewState the way the TUI loop applies them.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tokio::sync::mpsc;

use drafthub_app::app::{self, AppState};
use drafthub_core::config::Config;
use drafthub_core::model::RequestDirection;
use drafthub_core::protocol::{UiUpdate, UserCommand};
use drafthub_core::sample::SeedData;
use drafthub_tui::tui::{self, input, Screen, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

struct Session {
    view: ViewState,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Session {
    async fn start(config: Config) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        let view = ViewState::new(&config);
        let handle = tokio::spawn(app::run(cmd_rx, ui_tx, AppState::new(config, SeedData::default())));
        let mut session = Session {
            view,
            cmd_tx,
            ui_rx,
            handle,
        };
        session.drain().await;
        session
    }

    /// Apply every update the orchestrator has queued.
    async fn drain(&mut self) {
        while let Ok(Some(update)) = tokio::time::timeout(Duration::from_millis(100), self.ui_rx.recv()).await {
            tui::apply_ui_update(&mut self.view, update);
        }
    }

    /// Press a key; forward any resulting command and apply the replies.
    async fn press(&mut self, code: KeyCode) -> Option<UserCommand> {
        let cmd = input::handle_key(key(code), &mut self.view)?;
        self.cmd_tx.send(cmd.clone()).await.unwrap();
        if cmd != UserCommand::Quit {
            self.drain().await;
        }
        Some(cmd)
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c)).await;
        }
    }

    fn render(&self) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 36);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| tui::render_frame(frame, &self.view)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    async fn signed_in(config: Config) -> Self {
        let mut config = config;
        config.session.start_authenticated = true;
        let session = Session::start(config).await;
        assert!(session.view.is_authenticated());
        session
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn login_by_keyboard_opens_dashboard() {
    let mut s = Session::start(Config::default()).await;
    assert!(s.render().contains("Sign Up"));

    s.press(KeyCode::Enter).await;
    s.type_text("alex@example.com").await;
    s.press(KeyCode::Enter).await;
    s.press(KeyCode::Down).await;
    s.press(KeyCode::Enter).await;
    s.type_text("secret1").await;
    s.press(KeyCode::Enter).await;

    let cmd = s.press(KeyCode::Char('s')).await;
    assert!(matches!(cmd, Some(UserCommand::Login(_))));
    assert!(s.view.is_authenticated());
    assert_eq!(s.view.screen, Screen::Dashboard);
    assert!(s.view.toast.as_deref().unwrap().contains("Signed in as alex@example.com"));
    assert!(s.render().contains("Fantasy Football 2023"));
}

#[tokio::test]
async fn invalid_login_never_reaches_orchestrator() {
    let mut s = Session::start(Config::default()).await;
    assert!(s.press(KeyCode::Char('s')).await.is_none());
    assert!(!s.view.is_authenticated());
    assert!(s.render().contains("Please enter a valid email address"));
}

#[tokio::test]
async fn accepting_invitation_removes_it() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('2')).await;
    s.press(KeyCode::Tab).await;
    s.press(KeyCode::Tab).await;
    let cmd = s.press(KeyCode::Char('a')).await;
    assert_eq!(cmd, Some(UserCommand::AcceptInvitation("101".into())));
    assert_eq!(s.view.session.data.invitations.len(), 1);
    assert!(s.view.toast.as_deref().unwrap().contains("Joined Fantasy Baseball 2023"));
    assert!(s.render().contains("Invitations (1)"));
}

#[tokio::test]
async fn wizard_creates_draft_on_dashboard() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('3')).await;
    s.press(KeyCode::Enter).await;
    s.type_text("Road Trip Snacks").await;
    s.press(KeyCode::Enter).await;
    for _ in 0..4 {
        s.press(KeyCode::Char('n')).await;
    }
    let cmd = s.press(KeyCode::Char('s')).await;
    assert!(matches!(cmd, Some(UserCommand::CreateDraft(_))));

    assert_eq!(s.view.screen, Screen::Dashboard);
    assert_eq!(s.view.session.data.active_drafts.len(), 5);
    assert!(s.view.toast.as_deref().unwrap().contains("Created \"Road Trip Snacks\""));

    s.press(KeyCode::Char('/')).await;
    s.type_text("road").await;
    s.press(KeyCode::Enter).await;
    assert!(s.render().contains("Road Trip Snacks"));
}

#[tokio::test]
async fn friend_request_round_trip() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('4')).await;
    s.press(KeyCode::Char('a')).await;
    s.type_text("Sam Porter").await;
    s.press(KeyCode::Enter).await;

    let outgoing = s
        .view
        .session
        .data
        .friend_requests
        .iter()
        .filter(|r| r.direction == RequestDirection::Outgoing)
        .count();
    assert_eq!(outgoing, 2);

    // Accept the first incoming request from the requests tab
    s.press(KeyCode::Tab).await;
    s.press(KeyCode::Char('a')).await;
    assert!(s.view.session.data.friends.iter().any(|f| f.name == "Michael Taylor"));
    assert!(s.render().contains("Requests (3)"));
}

#[tokio::test]
async fn notifications_mark_all_read() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('i')).await;
    s.press(KeyCode::Char('m')).await;
    assert!(s.view.session.data.notifications.iter().all(|n| n.read));
    assert!(!s.render().contains("Mark all as read"));
}

#[tokio::test]
async fn logout_from_account_menu_returns_to_sign_in() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('u')).await;
    s.press(KeyCode::Down).await;
    s.press(KeyCode::Down).await;
    assert_eq!(s.press(KeyCode::Enter).await, Some(UserCommand::Logout));
    assert!(!s.view.is_authenticated());
    let text = s.render();
    assert!(text.contains("Sign Up"));
    assert!(!text.contains("Active Drafts"));
}

#[tokio::test]
async fn recent_draft_opens_from_draft_options() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Tab).await;
    s.press(KeyCode::Down).await;
    s.press(KeyCode::Down).await;
    let cmd = s.press(KeyCode::Enter).await;
    assert_eq!(cmd, Some(UserCommand::EnterDraftRoom("101".into())));
    assert!(s
        .view
        .toast
        .as_deref()
        .unwrap()
        .ends_with("Opening results of Fantasy Football 2023"));
}

#[tokio::test]
async fn profile_shows_identicon_from_configured_endpoint() {
    let mut config = Config::default();
    config.avatar.endpoint = "https://id.example/svg".into();
    let mut s = Session::signed_in(config).await;
    assert_eq!(
        s.view.session.data.user.avatar.as_deref(),
        Some("https://id.example/svg?seed=user1")
    );

    s.press(KeyCode::Char('u')).await;
    assert!(s.press(KeyCode::Enter).await.is_none());
    assert!(s
        .view
        .toast
        .as_deref()
        .unwrap()
        .ends_with("avatar: https://id.example/svg?seed=user1"));
}

#[tokio::test]
async fn quit_stops_orchestrator() {
    let mut s = Session::signed_in(Config::default()).await;
    s.press(KeyCode::Char('q')).await;
    assert!(s.render().contains("Leave DraftHub?"));
    assert_eq!(s.press(KeyCode::Char('y')).await, Some(UserCommand::Quit));
    let result = tokio::time::timeout(Duration::from_secs(1), s.handle).await;
    assert!(result.unwrap().unwrap().is_ok());
}
