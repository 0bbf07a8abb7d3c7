// Application state and orchestration logic.
//
// The views never mutate session data themselves. Every interaction arrives
// here as a `UserCommand`; the orchestrator applies the bookkeeping and pushes
// a fresh snapshot (plus a one-line toast) back to the TUI render loop.

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use drafthub_core::avatar::avatar_url;
use drafthub_core::config::Config;
use drafthub_core::model::{
    DraftStatus, DraftSummary, Friend, FriendRequest, Participant, Presence, RecentDraftStatus,
    RequestDirection,
};
use drafthub_core::protocol::{SessionSnapshot, UiUpdate, UserCommand};
use drafthub_core::sample::SeedData;
use drafthub_core::wizard::DraftConfig;

/// Display timestamp given to requests created during this session.
pub const JUST_NOW: &str = "just now";

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Session data owned by the orchestrator.
pub struct AppState {
    pub config: Config,
    pub authenticated: bool,
    pub data: SeedData,
    /// Source of ids for records minted during the session.
    next_id: u64,
}

/// What applying one command produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Session data changed and a new snapshot should be pushed.
    pub changed: bool,
    /// Status line for the user, already stamped with the time.
    pub toast: Option<String>,
}

impl CommandOutcome {
    fn changed(toast: String) -> Self {
        CommandOutcome {
            changed: true,
            toast: Some(toast),
        }
    }

    fn unchanged(toast: String) -> Self {
        CommandOutcome {
            changed: false,
            toast: Some(toast),
        }
    }

    fn ignored() -> Self {
        CommandOutcome::default()
    }
}

impl AppState {
    /// The configured profile is the signed-in user regardless of what the
    /// seed data carries.
    pub fn new(config: Config, mut data: SeedData) -> Self {
        data.user = config.user.clone();
        AppState {
            authenticated: config.session.start_authenticated,
            config,
            data,
            next_id: 1,
        }
    }

    /// Snapshot for the views. Records without an avatar of their own get
    /// the configured identicon.
    pub fn build_snapshot(&self) -> SessionSnapshot {
        let mut data = self.data.clone();
        resolve_avatars(&mut data, &self.config.avatar.endpoint);
        SessionSnapshot {
            authenticated: self.authenticated,
            data,
        }
    }

    fn mint_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// What opening `draft_id` means for the user: entering an active room,
    /// or revisiting one of the recent drafts.
    fn draft_entry(&self, draft_id: &str) -> Option<String> {
        if let Some(draft) = self.data.active_drafts.iter().find(|d| d.id == draft_id) {
            return Some(format!("Entering {}", draft.title));
        }
        self.data
            .recent_drafts
            .iter()
            .find(|d| d.id == draft_id)
            .map(|d| match d.status {
                RecentDraftStatus::Completed => format!("Opening results of {}", d.title),
                RecentDraftStatus::InProgress => format!("Continuing {}", d.title),
            })
    }

    /// Apply one command to the session. `Quit` is handled by the event loop
    /// and is a no-op here.
    pub fn apply(&mut self, cmd: UserCommand, now: DateTime<Local>) -> CommandOutcome {
        let stamp = |msg: String| format!("[{}] {}", now.format("%H:%M"), msg);

        match cmd {
            UserCommand::Login(form) => {
                if let Err(errors) = form.validate() {
                    warn!("Login rejected: {} invalid field(s)", errors.len());
                    return CommandOutcome::unchanged(stamp("Sign in failed".into()));
                }
                self.authenticated = true;
                info!("User signed in");
                CommandOutcome::changed(stamp(format!("Signed in as {}", form.email)))
            }
            UserCommand::Signup(form) => {
                if let Err(errors) = form.validate() {
                    warn!("Signup rejected: {} invalid field(s)", errors.len());
                    return CommandOutcome::unchanged(stamp("Sign up failed".into()));
                }
                self.data.user.name = form.name.trim().to_string();
                self.data.user.email = form.email.clone();
                self.authenticated = true;
                info!("New account created");
                CommandOutcome::changed(stamp(format!("Welcome, {}!", self.data.user.name)))
            }
            UserCommand::Logout => {
                if !self.authenticated {
                    return CommandOutcome::ignored();
                }
                self.authenticated = false;
                info!("User signed out");
                CommandOutcome::changed(stamp("Signed out".into()))
            }
            UserCommand::JoinByCode(code) => {
                let code = code.trim();
                if code.is_empty() {
                    warn!("Ignoring join with blank code");
                    return CommandOutcome::ignored();
                }
                info!("Join by code requested: {}", code);
                CommandOutcome::unchanged(stamp(format!("Joining draft with code {code}")))
            }
            UserCommand::JoinPublicDraft(id) => {
                match self.data.public_drafts.iter().find(|d| d.id == id) {
                    Some(draft) => {
                        info!("Join public draft {} ({})", draft.id, draft.title);
                        CommandOutcome::unchanged(stamp(format!("Joining {}", draft.title)))
                    }
                    None => {
                        warn!("Join requested for unknown public draft {}", id);
                        CommandOutcome::ignored()
                    }
                }
            }
            UserCommand::AcceptInvitation(id) => self.resolve_invitation(&id, true, stamp),
            UserCommand::DeclineInvitation(id) => self.resolve_invitation(&id, false, stamp),
            UserCommand::EnterDraftRoom(id) => match self.draft_entry(&id) {
                Some(message) => {
                    info!("Opening draft {}", id);
                    CommandOutcome::unchanged(stamp(message))
                }
                None => {
                    warn!("Enter requested for unknown draft {}", id);
                    CommandOutcome::ignored()
                }
            },
            UserCommand::AcceptRequest(id) => {
                let Some(request) = self.take_request(&id, RequestDirection::Incoming) else {
                    return CommandOutcome::ignored();
                };
                let friend = Friend {
                    id: self.mint_id("friend"),
                    name: request.name,
                    avatar: request.avatar,
                    status: Presence::Online,
                    last_active: None,
                };
                info!("Friend request {} accepted", id);
                let toast = stamp(format!("You are now friends with {}", friend.name));
                self.data.friends.push(friend);
                CommandOutcome::changed(toast)
            }
            UserCommand::RejectRequest(id) => match self.take_request(&id, RequestDirection::Incoming) {
                Some(request) => {
                    info!("Friend request {} rejected", id);
                    CommandOutcome::changed(stamp(format!("Declined request from {}", request.name)))
                }
                None => CommandOutcome::ignored(),
            },
            UserCommand::CancelRequest(id) => match self.take_request(&id, RequestDirection::Outgoing) {
                Some(request) => {
                    info!("Friend request {} cancelled", id);
                    CommandOutcome::changed(stamp(format!("Cancelled request to {}", request.name)))
                }
                None => CommandOutcome::ignored(),
            },
            UserCommand::RemoveFriend(id) => {
                let Some(idx) = self.data.friends.iter().position(|f| f.id == id) else {
                    warn!("Remove requested for unknown friend {}", id);
                    return CommandOutcome::ignored();
                };
                let friend = self.data.friends.remove(idx);
                info!("Friend {} removed", id);
                CommandOutcome::changed(stamp(format!("Removed {} from friends", friend.name)))
            }
            UserCommand::SendRequest(username) => self.send_request(&username, stamp),
            UserCommand::NotificationClick(notification) => {
                let Some(entry) = self
                    .data
                    .notifications
                    .iter_mut()
                    .find(|n| n.id == notification.id)
                else {
                    warn!("Click on unknown notification {}", notification.id);
                    return CommandOutcome::ignored();
                };
                let was_unread = !entry.read;
                entry.read = true;
                debug!("Notification {} opened", notification.id);
                CommandOutcome {
                    changed: was_unread,
                    toast: Some(stamp(notification.title)),
                }
            }
            UserCommand::MarkAllAsRead => {
                let mut marked = 0;
                for n in self.data.notifications.iter_mut().filter(|n| !n.read) {
                    n.read = true;
                    marked += 1;
                }
                if marked == 0 {
                    return CommandOutcome::ignored();
                }
                info!("Marked {} notification(s) as read", marked);
                CommandOutcome::changed(stamp("All notifications marked as read".into()))
            }
            UserCommand::CreateDraft(config) => self.create_draft(*config, stamp),
            UserCommand::CancelCreateDraft => {
                info!("Draft creation cancelled");
                CommandOutcome::unchanged(stamp("Draft creation cancelled".into()))
            }
            UserCommand::Quit => CommandOutcome::ignored(),
        }
    }

    fn resolve_invitation(
        &mut self,
        id: &str,
        accept: bool,
        stamp: impl Fn(String) -> String,
    ) -> CommandOutcome {
        let Some(idx) = self.data.invitations.iter().position(|i| i.id == id) else {
            warn!("Unknown invitation {}", id);
            return CommandOutcome::ignored();
        };
        let invitation = self.data.invitations.remove(idx);
        if accept {
            info!("Invitation {} accepted", id);
            CommandOutcome::changed(stamp(format!("Joined {}", invitation.title)))
        } else {
            info!("Invitation {} declined", id);
            CommandOutcome::changed(stamp(format!("Declined invitation to {}", invitation.title)))
        }
    }

    /// Remove and return a pending request, only if it has the expected direction.
    fn take_request(&mut self, id: &str, direction: RequestDirection) -> Option<FriendRequest> {
        let idx = self
            .data
            .friend_requests
            .iter()
            .position(|r| r.id == id && r.direction == direction);
        match idx {
            Some(idx) => Some(self.data.friend_requests.remove(idx)),
            None => {
                warn!("No {:?} friend request with id {}", direction, id);
                None
            }
        }
    }

    fn send_request(&mut self, username: &str, stamp: impl Fn(String) -> String) -> CommandOutcome {
        let name = username.trim();
        if name.is_empty() {
            warn!("Ignoring friend request with blank username");
            return CommandOutcome::ignored();
        }
        let lower = name.to_lowercase();
        if self.data.friends.iter().any(|f| f.name.to_lowercase() == lower) {
            return CommandOutcome::unchanged(stamp(format!("{name} is already your friend")));
        }
        if self
            .data
            .friend_requests
            .iter()
            .any(|r| r.name.to_lowercase() == lower)
        {
            return CommandOutcome::unchanged(stamp(format!("A request with {name} is already pending")));
        }

        let request = FriendRequest {
            id: self.mint_id("req"),
            name: name.to_string(),
            avatar: None,
            direction: RequestDirection::Outgoing,
            timestamp: JUST_NOW.to_string(),
        };
        info!("Friend request {} sent", request.id);
        self.data.friend_requests.push(request);
        CommandOutcome::changed(stamp(format!("Friend request sent to {name}")))
    }

    fn create_draft(&mut self, config: DraftConfig, stamp: impl Fn(String) -> String) -> CommandOutcome {
        if let Err(errors) = config.validate() {
            warn!("Refusing invalid draft: {} field(s) need attention", errors.len());
            return CommandOutcome::unchanged(stamp("Draft could not be created".into()));
        }

        let id = self.mint_id("draft");
        let user = &self.data.user;
        let summary = DraftSummary {
            id,
            title: config.title.trim().to_string(),
            format: config.format,
            status: DraftStatus::Waiting,
            participants: vec![Participant {
                id: user.id.clone(),
                name: user.name.clone(),
                avatar: user.avatar.clone(),
            }],
            current_picker: None,
            time_remaining: None,
            your_turn_position: None,
            completion_percentage: 0,
        };
        let link = config.share_link(&self.config.invite.share_base);
        info!(
            "Draft {} created: \"{}\" ({}, {} invited)",
            summary.id,
            summary.title,
            summary.format,
            config.invited_users.len()
        );
        let toast = stamp(format!("Created \"{}\". Share {}", summary.title, link));
        self.data.active_drafts.push(summary);
        CommandOutcome::changed(toast)
    }
}

/// Key each user-like record's identicon by its own id. Requests carry no
/// user id, so the request id stands in.
fn resolve_avatars(data: &mut SeedData, endpoint: &str) {
    let resolve = |id: &str, avatar: &mut Option<String>| {
        *avatar = Some(avatar_url(endpoint, id, avatar.as_deref()));
    };
    resolve(&data.user.id, &mut data.user.avatar);
    for p in data.active_drafts.iter_mut().flat_map(|d| d.participants.iter_mut()) {
        resolve(&p.id, &mut p.avatar);
    }
    for f in data.friends.iter_mut() {
        resolve(&f.id, &mut f.avatar);
    }
    for r in data.friend_requests.iter_mut() {
        resolve(&r.id, &mut r.avatar);
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestration loop.
///
/// Pushes an initial snapshot, then applies each command from the TUI and
/// answers through `ui_tx`. Exits on `Quit` or when the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn handle_user_command(state: &mut AppState, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
    debug!("Handling command: {}", cmd.name());
    let outcome = state.apply(cmd, Local::now());

    if outcome.changed {
        let snapshot = state.build_snapshot();
        if ui_tx
            .send(UiUpdate::Snapshot(Box::new(snapshot)))
            .await
            .is_err()
        {
            warn!("UI channel closed; dropping snapshot");
            return;
        }
    }
    if let Some(toast) = outcome.toast {
        let _ = ui_tx.send(UiUpdate::Toast(toast)).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drafthub_core::model::unread_count;
    use drafthub_core::validation::{LoginForm, SignupForm};

    fn test_state() -> AppState {
        AppState::new(Config::default(), SeedData::default())
    }

    fn at_nine() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).single().unwrap()
    }

    fn apply(state: &mut AppState, cmd: UserCommand) -> CommandOutcome {
        state.apply(cmd, at_nine())
    }

    // -----------------------------------------------------------------------
    // Tests: session
    // -----------------------------------------------------------------------

    #[test]
    fn starts_signed_out_by_default() {
        let state = test_state();
        assert!(!state.authenticated);
        assert!(!state.build_snapshot().authenticated);
    }

    #[test]
    fn start_authenticated_from_config() {
        let mut config = Config::default();
        config.session.start_authenticated = true;
        let state = AppState::new(config, SeedData::default());
        assert!(state.authenticated);
    }

    #[test]
    fn configured_user_replaces_seed_user() {
        let mut config = Config::default();
        config.user.name = "Sam Rivera".into();
        let state = AppState::new(config, SeedData::default());
        assert_eq!(state.data.user.name, "Sam Rivera");
    }

    #[test]
    fn valid_login_signs_in_with_stamped_toast() {
        let mut state = test_state();
        let outcome = apply(
            &mut state,
            UserCommand::Login(LoginForm {
                email: "alex@example.com".into(),
                password: "abcdef".into(),
            }),
        );
        assert!(outcome.changed);
        assert_eq!(outcome.toast.as_deref(), Some("[09:05] Signed in as alex@example.com"));
        assert!(state.authenticated);
    }

    #[test]
    fn invalid_login_is_refused() {
        let mut state = test_state();
        let outcome = apply(
            &mut state,
            UserCommand::Login(LoginForm {
                email: "not-an-email".into(),
                password: "abcdef".into(),
            }),
        );
        assert!(!outcome.changed);
        assert!(!state.authenticated);
    }

    #[test]
    fn signup_updates_profile() {
        let mut state = test_state();
        let outcome = apply(
            &mut state,
            UserCommand::Signup(SignupForm {
                name: "Jordan Lee".into(),
                email: "jordan@example.com".into(),
                password: "abc123".into(),
                confirm_password: "abc123".into(),
            }),
        );
        assert!(outcome.changed);
        assert!(state.authenticated);
        assert_eq!(state.data.user.name, "Jordan Lee");
        assert_eq!(state.data.user.email, "jordan@example.com");
    }

    #[test]
    fn logout_clears_session() {
        let mut state = test_state();
        state.authenticated = true;
        assert!(apply(&mut state, UserCommand::Logout).changed);
        assert!(!state.authenticated);
        assert!(!apply(&mut state, UserCommand::Logout).changed);
    }

    // -----------------------------------------------------------------------
    // Tests: joining
    // -----------------------------------------------------------------------

    #[test]
    fn blank_join_code_is_ignored() {
        let mut state = test_state();
        assert_eq!(
            apply(&mut state, UserCommand::JoinByCode("   ".into())),
            CommandOutcome::default()
        );
        let outcome = apply(&mut state, UserCommand::JoinByCode(" ab12cd ".into()));
        assert_eq!(outcome.toast.as_deref(), Some("[09:05] Joining draft with code ab12cd"));
    }

    #[test]
    fn accepting_invitation_removes_it() {
        let mut state = test_state();
        let before = state.data.invitations.len();
        let id = state.data.invitations[0].id.clone();
        let outcome = apply(&mut state, UserCommand::AcceptInvitation(id.clone()));
        assert!(outcome.changed);
        assert_eq!(state.data.invitations.len(), before - 1);
        assert!(state.data.invitations.iter().all(|i| i.id != id));
        assert!(!apply(&mut state, UserCommand::DeclineInvitation(id)).changed);
    }

    #[test]
    fn recent_drafts_open_by_status() {
        let mut state = test_state();
        let done = apply(&mut state, UserCommand::EnterDraftRoom("101".into()));
        assert!(!done.changed);
        assert!(done.toast.unwrap().ends_with("Opening results of Fantasy Football 2023"));

        let ongoing = apply(&mut state, UserCommand::EnterDraftRoom("102".into()));
        assert!(ongoing.toast.unwrap().ends_with("Continuing Movie Draft Night"));
    }

    #[test]
    fn active_draft_wins_over_recent_with_same_id() {
        let mut state = test_state();
        state.data.recent_drafts[0].id = "1".into();
        let outcome = apply(&mut state, UserCommand::EnterDraftRoom("1".into()));
        assert!(outcome.toast.unwrap().ends_with("Entering Fantasy Football 2023"));
    }

    #[test]
    fn snapshot_fills_missing_avatars_from_endpoint() {
        let mut config = Config::default();
        config.avatar.endpoint = "https://id.example/svg".into();
        let mut seed = SeedData::default();
        seed.friends[1].avatar = Some("https://cdn.example/m.png".into());
        let state = AppState::new(config, seed);

        let data = state.build_snapshot().data;
        assert_eq!(data.user.avatar.as_deref(), Some("https://id.example/svg?seed=user1"));
        let friend = &data.friends[0];
        assert_eq!(friend.avatar, Some(format!("https://id.example/svg?seed={}", friend.id)));
        assert_eq!(data.friends[1].avatar.as_deref(), Some("https://cdn.example/m.png"));
        assert!(data
            .active_drafts
            .iter()
            .flat_map(|d| &d.participants)
            .all(|p| p.avatar.is_some()));
        assert!(data.friend_requests.iter().all(|r| r.avatar.is_some()));
        // Session data itself keeps the raw values
        assert!(state.data.user.avatar.is_none());
    }

    #[test]
    fn enter_unknown_draft_is_ignored() {
        let mut state = test_state();
        assert_eq!(
            apply(&mut state, UserCommand::EnterDraftRoom("nope".into())),
            CommandOutcome::default()
        );
    }

    // -----------------------------------------------------------------------
    // Tests: friends
    // -----------------------------------------------------------------------

    #[test]
    fn accepting_request_adds_friend() {
        let mut state = test_state();
        let friends_before = state.data.friends.len();
        let outcome = apply(&mut state, UserCommand::AcceptRequest("req1".into()));
        assert!(outcome.changed);
        assert_eq!(state.data.friends.len(), friends_before + 1);
        assert!(state.data.friend_requests.iter().all(|r| r.id != "req1"));
        assert_eq!(state.data.friends.last().unwrap().status, Presence::Online);
    }

    #[test]
    fn cancel_only_applies_to_outgoing() {
        let mut state = test_state();
        // req1 is incoming; cancel must not touch it
        assert!(!apply(&mut state, UserCommand::CancelRequest("req1".into())).changed);
        assert!(state.data.friend_requests.iter().any(|r| r.id == "req1"));
        assert!(apply(&mut state, UserCommand::CancelRequest("req3".into())).changed);
        assert!(state.data.friend_requests.iter().all(|r| r.id != "req3"));
    }

    #[test]
    fn reject_removes_incoming_request() {
        let mut state = test_state();
        assert!(apply(&mut state, UserCommand::RejectRequest("req2".into())).changed);
        assert!(state.data.friend_requests.iter().all(|r| r.id != "req2"));
    }

    #[test]
    fn remove_friend() {
        let mut state = test_state();
        let id = state.data.friends[0].id.clone();
        assert!(apply(&mut state, UserCommand::RemoveFriend(id.clone())).changed);
        assert!(state.data.friends.iter().all(|f| f.id != id));
    }

    #[test]
    fn send_request_is_trimmed_and_stamped_just_now() {
        let mut state = test_state();
        let outcome = apply(&mut state, UserCommand::SendRequest("  Casey Morgan ".into()));
        assert!(outcome.changed);
        let req = state.data.friend_requests.last().unwrap();
        assert_eq!(req.name, "Casey Morgan");
        assert_eq!(req.direction, RequestDirection::Outgoing);
        assert_eq!(req.timestamp, JUST_NOW);
    }

    #[test]
    fn send_request_skips_blank_and_duplicates() {
        let mut state = test_state();
        let count = state.data.friend_requests.len();
        assert!(!apply(&mut state, UserCommand::SendRequest("  ".into())).changed);
        let friend_name = state.data.friends[0].name.to_uppercase();
        assert!(!apply(&mut state, UserCommand::SendRequest(friend_name)).changed);
        assert_eq!(state.data.friend_requests.len(), count);
    }

    // -----------------------------------------------------------------------
    // Tests: notifications
    // -----------------------------------------------------------------------

    #[test]
    fn notification_click_marks_read() {
        let mut state = test_state();
        let unread = state
            .data
            .notifications
            .iter()
            .find(|n| !n.read)
            .cloned()
            .unwrap();
        let before = unread_count(&state.data.notifications);
        let outcome = apply(&mut state, UserCommand::NotificationClick(unread.clone()));
        assert!(outcome.changed);
        assert_eq!(unread_count(&state.data.notifications), before - 1);

        let again = apply(&mut state, UserCommand::NotificationClick(unread));
        assert!(!again.changed);
        assert!(again.toast.is_some());
    }

    #[test]
    fn mark_all_as_read_zeroes_unread() {
        let mut state = test_state();
        assert!(apply(&mut state, UserCommand::MarkAllAsRead).changed);
        assert_eq!(unread_count(&state.data.notifications), 0);
        assert!(!apply(&mut state, UserCommand::MarkAllAsRead).changed);
    }

    // -----------------------------------------------------------------------
    // Tests: draft creation
    // -----------------------------------------------------------------------

    #[test]
    fn create_draft_appends_waiting_summary() {
        let mut state = test_state();
        let before = state.data.active_drafts.len();
        let config = DraftConfig {
            title: "Snack Draft".into(),
            ..DraftConfig::default()
        };
        let outcome = apply(&mut state, UserCommand::CreateDraft(Box::new(config.clone())));
        assert!(outcome.changed);
        assert_eq!(state.data.active_drafts.len(), before + 1);

        let draft = state.data.active_drafts.last().unwrap();
        assert_eq!(draft.title, "Snack Draft");
        assert_eq!(draft.status, DraftStatus::Waiting);
        assert_eq!(draft.participants.len(), 1);
        assert_eq!(draft.participants[0].id, state.data.user.id);

        let toast = outcome.toast.unwrap();
        assert!(toast.contains(&config.invite_code()), "toast: {toast}");
    }

    #[test]
    fn create_invalid_draft_is_refused() {
        let mut state = test_state();
        let before = state.data.active_drafts.len();
        let outcome = apply(
            &mut state,
            UserCommand::CreateDraft(Box::new(DraftConfig {
                title: "ab".into(),
                ..DraftConfig::default()
            })),
        );
        assert!(!outcome.changed);
        assert_eq!(state.data.active_drafts.len(), before);
    }

    #[test]
    fn minted_ids_are_unique() {
        let mut state = test_state();
        apply(&mut state, UserCommand::SendRequest("Pat One".into()));
        apply(&mut state, UserCommand::SendRequest("Pat Two".into()));
        let ids: Vec<&str> = state
            .data
            .friend_requests
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert!(ids.contains(&"req-1"));
        assert!(ids.contains(&"req-2"));
    }

    // -----------------------------------------------------------------------
    // Tests: async event loop
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn event_loop_sends_initial_snapshot_and_quits() {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, test_state()));

        let update = ui_rx.recv().await.unwrap();
        assert!(
            matches!(&update, UiUpdate::Snapshot(s) if !s.authenticated),
            "Expected initial snapshot, got {:?}",
            update
        );

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn event_loop_answers_with_snapshot_then_toast() {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, test_state()));
        let _initial = ui_rx.recv().await.unwrap();

        cmd_tx.send(UserCommand::MarkAllAsRead).await.unwrap();

        match ui_rx.recv().await.unwrap() {
            UiUpdate::Snapshot(s) => assert_eq!(unread_count(&s.data.notifications), 0),
            other => panic!("Expected Snapshot, got {:?}", other),
        }
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Toast(t) => assert!(t.ends_with("All notifications marked as read")),
            other => panic!("Expected Toast, got {:?}", other),
        }

        drop(cmd_tx);
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }
}
