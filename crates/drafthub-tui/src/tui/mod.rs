// Terminal front end: view state, layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest session snapshot from the
// orchestrator plus everything that is purely local to the views (active
// screen and tabs, form values, search text, list cursors). The orchestrator
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders on a fixed tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use drafthub_core::config::{AuthTab, Config};
use drafthub_core::filter::filter_by_query;
use drafthub_core::model::{partition_requests, DraftSummary, Friend, FriendRequest, PublicDraft};
use drafthub_core::protocol::{SessionSnapshot, UiUpdate, UserCommand};
use drafthub_core::validation::{FieldErrors, LoginField, LoginForm, SignupField, SignupForm};
use drafthub_core::wizard::{CreateDraftWizard, DraftField};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Screens and tabs
// ---------------------------------------------------------------------------

/// Top-level screens reachable from the navigation bar once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    JoinDraft,
    CreateDraft,
    Friends,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Dashboard,
        Screen::JoinDraft,
        Screen::CreateDraft,
        Screen::Friends,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::JoinDraft => "Join Draft",
            Screen::CreateDraft => "Create Draft",
            Screen::Friends => "Friends",
        }
    }

    /// Number key that switches to this screen.
    pub fn hotkey(&self) -> char {
        match self {
            Screen::Dashboard => '1',
            Screen::JoinDraft => '2',
            Screen::CreateDraft => '3',
            Screen::Friends => '4',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    ActiveDrafts,
    DraftOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinTab {
    Code,
    Public,
    Invitations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendsTab {
    Friends,
    Requests,
}

/// Text input currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    DraftSearch,
    PublicSearch,
    FriendSearch,
    JoinCode,
    AddFriend,
    Auth(AuthField),
    Wizard(DraftField),
}

impl EditTarget {
    /// Search boxes are cleared when editing is abandoned with Esc.
    pub fn is_search(&self) -> bool {
        matches!(
            self,
            EditTarget::DraftSearch | EditTarget::PublicSearch | EditTarget::FriendSearch
        )
    }
}

// Cursor keys for the scrollable lists.
pub const CURSOR_DRAFTS: &str = "drafts";
pub const CURSOR_OPTIONS: &str = "options";
pub const CURSOR_PUBLIC: &str = "public";
pub const CURSOR_INVITATIONS: &str = "invitations";
pub const CURSOR_FRIENDS: &str = "friends";
pub const CURSOR_REQUESTS: &str = "requests";
pub const CURSOR_INVITES: &str = "wizard_invites";
pub const CURSOR_NOTIFICATIONS: &str = "notifications";
pub const CURSOR_ACCOUNT: &str = "account";

/// Entries of the account menu, in display order.
pub const ACCOUNT_MENU: [&str; 3] = ["Profile", "Friends", "Log out"];

// ---------------------------------------------------------------------------
// Auth form state
// ---------------------------------------------------------------------------

/// Inputs across both auth tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl AuthField {
    pub fn label(&self) -> &'static str {
        match self {
            AuthField::Name => "Full Name",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
            AuthField::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            AuthField::Name => "John Doe",
            AuthField::Email => "email@example.com",
            AuthField::Password | AuthField::ConfirmPassword => "••••••••",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, AuthField::Password | AuthField::ConfirmPassword)
    }
}

const LOGIN_FIELDS: [AuthField; 2] = [AuthField::Email, AuthField::Password];
const SIGNUP_FIELDS: [AuthField; 4] = [
    AuthField::Name,
    AuthField::Email,
    AuthField::Password,
    AuthField::ConfirmPassword,
];

/// Login / Sign Up form values, messages and focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub tab: AuthTab,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub login_errors: FieldErrors<LoginField>,
    pub signup_errors: FieldErrors<SignupField>,
    pub focus: usize,
    pub show_password: bool,
}

impl AuthView {
    pub fn new(tab: AuthTab) -> Self {
        AuthView {
            tab,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            login_errors: FieldErrors::new(),
            signup_errors: FieldErrors::new(),
            focus: 0,
            show_password: false,
        }
    }

    pub fn fields(&self) -> &'static [AuthField] {
        match self.tab {
            AuthTab::Login => &LOGIN_FIELDS,
            AuthTab::Signup => &SIGNUP_FIELDS,
        }
    }

    pub fn focused(&self) -> AuthField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn value(&self, field: AuthField) -> &str {
        match (self.tab, field) {
            (AuthTab::Login, AuthField::Email) => &self.login.email,
            (AuthTab::Login, AuthField::Password) => &self.login.password,
            (AuthTab::Login, _) => "",
            (AuthTab::Signup, AuthField::Name) => &self.signup.name,
            (AuthTab::Signup, AuthField::Email) => &self.signup.email,
            (AuthTab::Signup, AuthField::Password) => &self.signup.password,
            (AuthTab::Signup, AuthField::ConfirmPassword) => &self.signup.confirm_password,
        }
    }

    pub fn value_mut(&mut self, field: AuthField) -> Option<&mut String> {
        match (self.tab, field) {
            (AuthTab::Login, AuthField::Email) => Some(&mut self.login.email),
            (AuthTab::Login, AuthField::Password) => Some(&mut self.login.password),
            (AuthTab::Login, _) => None,
            (AuthTab::Signup, AuthField::Name) => Some(&mut self.signup.name),
            (AuthTab::Signup, AuthField::Email) => Some(&mut self.signup.email),
            (AuthTab::Signup, AuthField::Password) => Some(&mut self.signup.password),
            (AuthTab::Signup, AuthField::ConfirmPassword) => Some(&mut self.signup.confirm_password),
        }
    }

    /// Message to show under `field` from the last submission attempt.
    pub fn error(&self, field: AuthField) -> Option<String> {
        match self.tab {
            AuthTab::Login => {
                let key = match field {
                    AuthField::Email => LoginField::Email,
                    AuthField::Password => LoginField::Password,
                    _ => return None,
                };
                self.login_errors.message(key)
            }
            AuthTab::Signup => {
                let key = match field {
                    AuthField::Name => SignupField::Name,
                    AuthField::Email => SignupField::Email,
                    AuthField::Password => SignupField::Password,
                    AuthField::ConfirmPassword => SignupField::ConfirmPassword,
                };
                self.signup_errors.message(key)
            }
        }
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            AuthTab::Login => AuthTab::Signup,
            AuthTab::Signup => AuthTab::Login,
        };
        self.focus = 0;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Validate the active tab. Returns the command to send when valid;
    /// otherwise records the messages and returns `None`.
    pub fn submit(&mut self) -> Option<UserCommand> {
        match self.tab {
            AuthTab::Login => match self.login.validate() {
                Ok(()) => {
                    self.login_errors = FieldErrors::new();
                    Some(UserCommand::Login(self.login.clone()))
                }
                Err(errors) => {
                    debug!("Login form has {} invalid field(s)", errors.len());
                    self.login_errors = errors;
                    None
                }
            },
            AuthTab::Signup => match self.signup.validate() {
                Ok(()) => {
                    self.signup_errors = FieldErrors::new();
                    Some(UserCommand::Signup(self.signup.clone()))
                }
                Err(errors) => {
                    debug!("Signup form has {} invalid field(s)", errors.len());
                    self.signup_errors = errors;
                    None
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state.
///
/// `session` is replaced wholesale by each snapshot from the orchestrator;
/// every other field is owned by the views and survives snapshots.
pub struct ViewState {
    /// Latest session data pushed by the orchestrator.
    pub session: SessionSnapshot,
    /// Screen shown while signed in.
    pub screen: Screen,
    pub dashboard_tab: DashboardTab,
    pub join_tab: JoinTab,
    pub friends_tab: FriendsTab,
    /// Tab the sign-in view opens on after a logout.
    pub default_auth_tab: AuthTab,
    pub auth: AuthView,
    pub wizard: CreateDraftWizard,
    /// Index into the current step's visible fields.
    pub wizard_focus: usize,
    /// Per-list cursor positions (keyed by list name).
    pub cursor: HashMap<String, usize>,
    pub draft_query: String,
    pub public_query: String,
    pub friend_query: String,
    pub join_code: String,
    pub add_friend: String,
    /// Input receiving keystrokes, if any.
    pub editing: Option<EditTarget>,
    pub show_notifications: bool,
    pub show_account_menu: bool,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    /// Latest status line from the orchestrator or a local action.
    pub toast: Option<String>,
    pub share_base: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(&Config::default())
    }
}

impl ViewState {
    pub fn new(config: &Config) -> Self {
        ViewState {
            session: SessionSnapshot {
                authenticated: config.session.start_authenticated,
                ..SessionSnapshot::default()
            },
            screen: Screen::Dashboard,
            dashboard_tab: DashboardTab::ActiveDrafts,
            join_tab: JoinTab::Code,
            friends_tab: FriendsTab::Friends,
            default_auth_tab: config.ui.default_auth_tab,
            auth: AuthView::new(config.ui.default_auth_tab),
            wizard: CreateDraftWizard::new(),
            wizard_focus: 0,
            cursor: HashMap::new(),
            draft_query: String::new(),
            public_query: String::new(),
            friend_query: String::new(),
            join_code: String::new(),
            add_friend: String::new(),
            editing: None,
            show_notifications: false,
            show_account_menu: false,
            confirm_quit: false,
            toast: None,
            share_base: config.invite.share_base.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Replace the session data, resetting view-local state on sign-in and
    /// sign-out transitions.
    pub fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        let was_authenticated = self.session.authenticated;
        self.session = snapshot;

        if !was_authenticated && self.session.authenticated {
            info!("Signed in; showing dashboard");
            self.screen = Screen::Dashboard;
            self.dashboard_tab = DashboardTab::ActiveDrafts;
            self.auth = AuthView::new(self.default_auth_tab);
        } else if was_authenticated && !self.session.authenticated {
            info!("Signed out; showing sign-in");
            self.auth = AuthView::new(self.default_auth_tab);
            self.wizard = CreateDraftWizard::new();
            self.wizard_focus = 0;
            self.editing = None;
            self.show_notifications = false;
            self.show_account_menu = false;
        }
        self.clamp_cursors();
    }

    // -- cursors --

    pub fn cursor(&self, key: &str) -> usize {
        self.cursor.get(key).copied().unwrap_or(0)
    }

    /// Move a list cursor by `delta`, clamped to `[0, len)`.
    pub fn move_cursor(&mut self, key: &str, delta: isize, len: usize) {
        let current = self.cursor(key);
        let next = if len == 0 {
            0
        } else {
            current.saturating_add_signed(delta).min(len - 1)
        };
        self.cursor.insert(key.to_string(), next);
    }

    pub fn reset_cursor(&mut self, key: &str) {
        self.cursor.insert(key.to_string(), 0);
    }

    fn clamp_cursors(&mut self) {
        let lens = [
            (CURSOR_DRAFTS, self.filtered_drafts().len()),
            (CURSOR_OPTIONS, self.option_count()),
            (CURSOR_PUBLIC, self.filtered_public_drafts().len()),
            (CURSOR_INVITATIONS, self.session.data.invitations.len()),
            (CURSOR_FRIENDS, self.filtered_friends().len()),
            (CURSOR_REQUESTS, self.ordered_requests().len()),
            (CURSOR_INVITES, self.session.data.friends.len()),
            (CURSOR_NOTIFICATIONS, self.session.data.notifications.len()),
        ];
        for (key, len) in lens {
            if let Some(pos) = self.cursor.get_mut(key) {
                *pos = (*pos).min(len.saturating_sub(1));
            }
        }
    }

    // -- derived lists --

    pub fn filtered_drafts(&self) -> Vec<&DraftSummary> {
        filter_by_query(&self.session.data.active_drafts, &self.draft_query)
    }

    pub fn filtered_public_drafts(&self) -> Vec<&PublicDraft> {
        filter_by_query(&self.session.data.public_drafts, &self.public_query)
    }

    pub fn filtered_friends(&self) -> Vec<&Friend> {
        filter_by_query(&self.session.data.friends, &self.friend_query)
    }

    /// Incoming requests first, then outgoing, as the requests tab lists them.
    pub fn ordered_requests(&self) -> Vec<&FriendRequest> {
        let (mut incoming, outgoing) = partition_requests(&self.session.data.friend_requests);
        incoming.extend(outgoing);
        incoming
    }

    /// The two option cards plus the recent drafts.
    pub fn option_count(&self) -> usize {
        2 + self.session.data.recent_drafts.len()
    }

    pub fn join_enabled(&self) -> bool {
        !self.join_code.trim().is_empty()
    }

    // -- wizard --

    pub fn wizard_fields(&self) -> Vec<DraftField> {
        self.wizard.config().visible_fields(self.wizard.step())
    }

    /// Field under the wizard cursor.
    pub fn focused_wizard_field(&self) -> Option<DraftField> {
        let fields = self.wizard_fields();
        if fields.is_empty() {
            return None;
        }
        Some(fields[self.wizard_focus.min(fields.len() - 1)])
    }

    /// Show the wizard, keeping any in-progress record.
    pub fn open_create_draft(&mut self) {
        self.screen = Screen::CreateDraft;
    }

    /// Drop the in-progress wizard and go back to the dashboard.
    pub fn close_create_draft(&mut self) {
        self.wizard = CreateDraftWizard::new();
        self.wizard_focus = 0;
        self.reset_cursor(CURSOR_INVITES);
        self.screen = Screen::Dashboard;
    }

    /// The string an `EditTarget` writes to, for plain text targets.
    pub fn edit_buffer_mut(&mut self, target: EditTarget) -> Option<&mut String> {
        match target {
            EditTarget::DraftSearch => Some(&mut self.draft_query),
            EditTarget::PublicSearch => Some(&mut self.public_query),
            EditTarget::FriendSearch => Some(&mut self.friend_query),
            EditTarget::JoinCode => Some(&mut self.join_code),
            EditTarget::AddFriend => Some(&mut self.add_friend),
            EditTarget::Auth(field) => self.auth.value_mut(field),
            EditTarget::Wizard(field) => self.wizard.config_mut().text_mut(field),
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Toast(message) => {
            state.toast = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: navigation bar, the active view, the help bar
/// and any open overlay.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::navbar::render(frame, layout.navbar, state);

    if state.is_authenticated() {
        match state.screen {
            Screen::Dashboard => render_dashboard(frame, layout.main, state),
            Screen::JoinDraft => widgets::join_draft::render(frame, layout.main, state),
            Screen::CreateDraft => widgets::create_draft::render(frame, layout.main, state),
            Screen::Friends => widgets::friend_manager::render(frame, layout.main, state),
        }
    } else {
        widgets::auth_form::render(frame, layout.main, state);
    }

    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.show_notifications {
        widgets::notifications::render(frame, layout.main, state);
    }
    if state.show_account_menu {
        widgets::account_menu::render(frame, layout.main, state);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [tabs_area, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let labels = ["Active Drafts".to_string(), "Draft Options".to_string()];
    let active = match state.dashboard_tab {
        DashboardTab::ActiveDrafts => 0,
        DashboardTab::DraftOptions => 1,
    };
    widgets::tabs::render(frame, tabs_area, &labels, active);

    match state.dashboard_tab {
        DashboardTab::ActiveDrafts => widgets::active_drafts::render(frame, body, state),
        DashboardTab::DraftOptions => widgets::draft_options::render(frame, body, state),
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop over UI updates, keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(config);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(config.ui.tick_rate_ms));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI loop");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            debug!("Sending command: {}", cmd.name());
                            if cmd_tx.send(cmd).await.is_err() {
                                warn!("Command channel closed");
                                break;
                            }
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use drafthub_core::sample::SeedData;

    fn signed_in() -> SessionSnapshot {
        SessionSnapshot {
            authenticated: true,
            data: SeedData::default(),
        }
    }

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
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

    fn render_to_text(state: &ViewState, width: u16, height: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn view_state_default_is_signed_out() {
        let state = ViewState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.auth.tab, AuthTab::Login);
        assert!(state.editing.is_none());
        assert!(!state.confirm_quit);
        assert!(state.toast.is_none());
    }

    #[test]
    fn config_picks_default_auth_tab() {
        let mut config = Config::default();
        config.ui.default_auth_tab = AuthTab::Signup;
        let state = ViewState::new(&config);
        assert_eq!(state.auth.tab, AuthTab::Signup);
        assert_eq!(state.auth.fields().len(), 4);
    }

    #[test]
    fn sign_in_snapshot_opens_dashboard() {
        let mut state = ViewState::default();
        state.screen = Screen::Friends;
        state.auth.login.password = "secret1".into();
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(signed_in())));
        assert!(state.is_authenticated());
        assert_eq!(state.screen, Screen::Dashboard);
        assert!(state.auth.login.password.is_empty());
    }

    #[test]
    fn sign_out_snapshot_resets_local_state() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(signed_in())));
        state.wizard.config_mut().title = "Half done".into();
        state.show_notifications = true;
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(SessionSnapshot::default())));
        assert!(!state.is_authenticated());
        assert!(state.wizard.config().title.is_empty());
        assert!(!state.show_notifications);
    }

    #[test]
    fn toast_update_sets_status_line() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Toast("[10:00] Signed out".into()));
        assert_eq!(state.toast.as_deref(), Some("[10:00] Signed out"));
    }

    #[test]
    fn snapshot_clamps_cursors() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(signed_in())));
        state.cursor.insert(CURSOR_FRIENDS.to_string(), 4);
        let mut fewer = signed_in();
        fewer.data.friends.truncate(2);
        state.apply_snapshot(fewer);
        assert_eq!(state.cursor(CURSOR_FRIENDS), 1);
    }

    #[test]
    fn move_cursor_stays_in_bounds() {
        let mut state = ViewState::default();
        state.move_cursor(CURSOR_DRAFTS, -1, 4);
        assert_eq!(state.cursor(CURSOR_DRAFTS), 0);
        state.move_cursor(CURSOR_DRAFTS, 10, 4);
        assert_eq!(state.cursor(CURSOR_DRAFTS), 3);
        state.move_cursor(CURSOR_DRAFTS, 1, 0);
        assert_eq!(state.cursor(CURSOR_DRAFTS), 0);
    }

    #[test]
    fn requests_are_incoming_first() {
        let mut state = ViewState::default();
        state.apply_snapshot(signed_in());
        let ids: Vec<&str> = state.ordered_requests().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["req1", "req2", "req3"]);
    }

    #[test]
    fn join_requires_non_blank_code() {
        let mut state = ViewState::default();
        assert!(!state.join_enabled());
        state.join_code = "   ".into();
        assert!(!state.join_enabled());
        state.join_code = " ABC123 ".into();
        assert!(state.join_enabled());
    }

    #[test]
    fn auth_errors_map_to_fields() {
        let mut auth = AuthView::new(AuthTab::Signup);
        auth.signup = SignupForm {
            name: "Alex".into(),
            email: "alex@example.com".into(),
            password: "abc123".into(),
            confirm_password: "abc124".into(),
        };
        assert!(auth.submit().is_none());
        assert_eq!(
            auth.error(AuthField::ConfirmPassword).as_deref(),
            Some("Passwords do not match")
        );
        assert!(auth.error(AuthField::Password).is_none());
    }

    #[test]
    fn signed_out_frame_shows_auth_form() {
        let state = ViewState::default();
        let text = render_to_text(&state, 100, 30);
        assert!(text.contains("Login"));
        assert!(text.contains("Sign Up"));
        assert!(!text.contains("Active Drafts"));
    }

    #[test]
    fn signed_in_frame_shows_dashboard() {
        let mut state = ViewState::default();
        state.apply_snapshot(signed_in());
        let text = render_to_text(&state, 120, 40);
        assert!(text.contains("Active Drafts"));
        assert!(text.contains("Fantasy Football 2023"));
    }

    #[test]
    fn every_screen_renders_without_panic() {
        let mut state = ViewState::default();
        state.apply_snapshot(signed_in());
        for screen in Screen::ALL {
            state.screen = screen;
            render_to_text(&state, 100, 30);
            render_to_text(&state, 20, 5);
        }
        state.show_notifications = true;
        state.show_account_menu = true;
        state.confirm_quit = true;
        render_to_text(&state, 100, 30);
    }
}
