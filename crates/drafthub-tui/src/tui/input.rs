// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into local ViewState changes (focus, tabs,
// cursors, form edits) or into UserCommand messages for the orchestrator.
//
// Modes, checked in order: quit confirmation, text editing, open overlays
// (notifications, account menu), the sign-in view, then the signed-in
// screens.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use drafthub_core::model::{unread_count, RequestDirection};
use drafthub_core::protocol::UserCommand;
use drafthub_core::wizard::{DraftField, FieldKind, WizardStep};

use super::{
    DashboardTab, EditTarget, FriendsTab, JoinTab, Screen, ViewState, ACCOUNT_MENU, CURSOR_ACCOUNT,
    CURSOR_DRAFTS, CURSOR_FRIENDS, CURSOR_INVITATIONS, CURSOR_INVITES, CURSOR_NOTIFICATIONS,
    CURSOR_OPTIONS, CURSOR_PUBLIC, CURSOR_REQUESTS,
};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports both Press and Release on some platforms
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if state.confirm_quit {
        return handle_confirm_quit(key_event, state);
    }

    if let Some(target) = state.editing {
        return handle_editing(key_event, target, state);
    }

    if state.show_notifications {
        return handle_notifications(key_event, state);
    }

    if state.show_account_menu {
        return handle_account_menu(key_event, state);
    }

    if key_event.code == KeyCode::Char('q') {
        state.confirm_quit = true;
        return None;
    }

    if !state.is_authenticated() {
        return handle_auth(key_event, state);
    }

    // Global keys while signed in
    match key_event.code {
        KeyCode::Char(c) if Screen::ALL.iter().any(|s| s.hotkey() == c) => {
            if let Some(screen) = Screen::ALL.into_iter().find(|s| s.hotkey() == c) {
                debug!("Switching to {:?}", screen);
                state.screen = screen;
            }
            return None;
        }
        KeyCode::Char('i') => {
            state.show_notifications = true;
            state.reset_cursor(CURSOR_NOTIFICATIONS);
            return None;
        }
        KeyCode::Char('u') => {
            state.show_account_menu = true;
            state.reset_cursor(CURSOR_ACCOUNT);
            return None;
        }
        _ => {}
    }

    match state.screen {
        Screen::Dashboard => handle_dashboard(key_event, state),
        Screen::JoinDraft => handle_join_draft(key_event, state),
        Screen::CreateDraft => handle_create_draft(key_event, state),
        Screen::Friends => handle_friends(key_event, state),
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Text editing
// ---------------------------------------------------------------------------

fn search_cursor(target: EditTarget) -> Option<&'static str> {
    match target {
        EditTarget::DraftSearch => Some(CURSOR_DRAFTS),
        EditTarget::PublicSearch => Some(CURSOR_PUBLIC),
        EditTarget::FriendSearch => Some(CURSOR_FRIENDS),
        _ => None,
    }
}

/// Keystrokes go to the active input.
///
/// - Printable characters append, Backspace removes the last character
/// - Enter leaves editing (inserts a newline in the custom item list); on the
///   join code and add-friend inputs it also submits
/// - Esc leaves editing; search boxes are cleared
fn handle_editing(key_event: KeyEvent, target: EditTarget, state: &mut ViewState) -> Option<UserCommand> {
    if let EditTarget::Wizard(field) = target {
        if field.kind() == FieldKind::Number {
            handle_number_editing(key_event, field, state);
            return None;
        }
    }

    match key_event.code {
        KeyCode::Esc => {
            state.editing = None;
            if target.is_search() {
                if let Some(buffer) = state.edit_buffer_mut(target) {
                    buffer.clear();
                }
            }
        }
        KeyCode::Enter => {
            if target == EditTarget::Wizard(DraftField::CustomItems) {
                state.wizard.config_mut().custom_items.push('\n');
                return None;
            }
            state.editing = None;
            match target {
                EditTarget::JoinCode => return join_by_code(state),
                EditTarget::AddFriend => return send_friend_request(state),
                _ => {}
            }
        }
        KeyCode::Backspace => {
            if let Some(buffer) = state.edit_buffer_mut(target) {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = state.edit_buffer_mut(target) {
                buffer.push(c);
            }
        }
        _ => return None,
    }

    if let Some(key) = search_cursor(target) {
        state.reset_cursor(key);
    }
    None
}

/// Digits append, Backspace drops the last digit, `-` flips the sign.
/// Enter or Esc leaves editing.
fn handle_number_editing(key_event: KeyEvent, field: DraftField, state: &mut ViewState) {
    if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
        state.editing = None;
        return;
    }
    let Some(value) = state.wizard.config_mut().number_mut(field) else {
        state.editing = None;
        return;
    };
    match key_event.code {
        KeyCode::Backspace => *value /= 10,
        KeyCode::Char('-') => *value = value.saturating_neg(),
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10) {
                let digit = i64::from(digit);
                let next = value.checked_mul(10).and_then(|v| {
                    if *value < 0 {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                });
                if let Some(n) = next {
                    *value = n;
                }
            }
        }
        _ => {}
    }
}

fn join_by_code(state: &mut ViewState) -> Option<UserCommand> {
    if !state.join_enabled() {
        return None;
    }
    Some(UserCommand::JoinByCode(state.join_code.trim().to_string()))
}

/// Send the trimmed username and clear the input; blank input sends nothing.
fn send_friend_request(state: &mut ViewState) -> Option<UserCommand> {
    let name = state.add_friend.trim().to_string();
    if name.is_empty() {
        return None;
    }
    state.add_friend.clear();
    Some(UserCommand::SendRequest(name))
}

/// Up/Down (and j/k) as a cursor delta.
fn vertical_delta(code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(-1),
        KeyCode::Down | KeyCode::Char('j') => Some(1),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_notifications(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    let len = state.session.data.notifications.len();
    if let Some(delta) = vertical_delta(key_event.code) {
        state.move_cursor(CURSOR_NOTIFICATIONS, delta, len);
        return None;
    }
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('i') => {
            state.show_notifications = false;
            None
        }
        KeyCode::Enter => state
            .session
            .data
            .notifications
            .get(state.cursor(CURSOR_NOTIFICATIONS))
            .cloned()
            .map(UserCommand::NotificationClick),
        KeyCode::Char('m') if unread_count(&state.session.data.notifications) > 0 => {
            Some(UserCommand::MarkAllAsRead)
        }
        _ => None,
    }
}

fn handle_account_menu(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    if let Some(delta) = vertical_delta(key_event.code) {
        state.move_cursor(CURSOR_ACCOUNT, delta, ACCOUNT_MENU.len());
        return None;
    }
    match key_event.code {
        KeyCode::Esc | KeyCode::Char('u') => {
            state.show_account_menu = false;
            None
        }
        KeyCode::Enter => {
            state.show_account_menu = false;
            match state.cursor(CURSOR_ACCOUNT) {
                0 => {
                    let user = &state.session.data.user;
                    state.toast = Some(match &user.avatar {
                        Some(url) => format!("{} <{}>  avatar: {}", user.name, user.email, url),
                        None => format!("{} <{}>", user.name, user.email),
                    });
                    None
                }
                1 => {
                    state.screen = Screen::Friends;
                    None
                }
                _ => Some(UserCommand::Logout),
            }
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Sign-in view
// ---------------------------------------------------------------------------

fn handle_auth(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('t') | KeyCode::Left | KeyCode::Right => {
            state.auth.switch_tab();
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            state.auth.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.auth.focus_previous();
            None
        }
        KeyCode::Enter => {
            state.editing = Some(EditTarget::Auth(state.auth.focused()));
            None
        }
        KeyCode::Char('v') => {
            state.auth.show_password = !state.auth.show_password;
            None
        }
        KeyCode::Char('s') => state.auth.submit(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn handle_dashboard(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    if matches!(key_event.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right) {
        state.dashboard_tab = match state.dashboard_tab {
            DashboardTab::ActiveDrafts => DashboardTab::DraftOptions,
            DashboardTab::DraftOptions => DashboardTab::ActiveDrafts,
        };
        return None;
    }

    match state.dashboard_tab {
        DashboardTab::ActiveDrafts => {
            if let Some(delta) = vertical_delta(key_event.code) {
                let len = state.filtered_drafts().len();
                state.move_cursor(CURSOR_DRAFTS, delta, len);
                return None;
            }
            match key_event.code {
                KeyCode::Char('/') => {
                    state.editing = Some(EditTarget::DraftSearch);
                    None
                }
                KeyCode::Esc => {
                    state.draft_query.clear();
                    state.reset_cursor(CURSOR_DRAFTS);
                    None
                }
                KeyCode::Enter => state
                    .filtered_drafts()
                    .get(state.cursor(CURSOR_DRAFTS))
                    .map(|d| UserCommand::EnterDraftRoom(d.id.clone())),
                _ => None,
            }
        }
        DashboardTab::DraftOptions => {
            if let Some(delta) = vertical_delta(key_event.code) {
                let len = state.option_count();
                state.move_cursor(CURSOR_OPTIONS, delta, len);
                return None;
            }
            if key_event.code != KeyCode::Enter {
                return None;
            }
            match state.cursor(CURSOR_OPTIONS) {
                0 => {
                    state.open_create_draft();
                    None
                }
                1 => {
                    state.screen = Screen::JoinDraft;
                    None
                }
                n => state
                    .session
                    .data
                    .recent_drafts
                    .get(n - 2)
                    .map(|d| UserCommand::EnterDraftRoom(d.id.clone())),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Join draft
// ---------------------------------------------------------------------------

fn handle_join_draft(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Tab => {
            state.join_tab = match state.join_tab {
                JoinTab::Code => JoinTab::Public,
                JoinTab::Public => JoinTab::Invitations,
                JoinTab::Invitations => JoinTab::Code,
            };
            return None;
        }
        KeyCode::BackTab => {
            state.join_tab = match state.join_tab {
                JoinTab::Code => JoinTab::Invitations,
                JoinTab::Public => JoinTab::Code,
                JoinTab::Invitations => JoinTab::Public,
            };
            return None;
        }
        _ => {}
    }

    match state.join_tab {
        JoinTab::Code => match key_event.code {
            KeyCode::Char('e') | KeyCode::Char('/') => {
                state.editing = Some(EditTarget::JoinCode);
                None
            }
            KeyCode::Enter => join_by_code(state),
            _ => None,
        },
        JoinTab::Public => {
            if let Some(delta) = vertical_delta(key_event.code) {
                let len = state.filtered_public_drafts().len();
                state.move_cursor(CURSOR_PUBLIC, delta, len);
                return None;
            }
            match key_event.code {
                KeyCode::Char('/') => {
                    state.editing = Some(EditTarget::PublicSearch);
                    None
                }
                KeyCode::Esc => {
                    state.public_query.clear();
                    state.reset_cursor(CURSOR_PUBLIC);
                    None
                }
                KeyCode::Enter => state
                    .filtered_public_drafts()
                    .get(state.cursor(CURSOR_PUBLIC))
                    .map(|d| UserCommand::JoinPublicDraft(d.id.clone())),
                _ => None,
            }
        }
        JoinTab::Invitations => {
            let len = state.session.data.invitations.len();
            if let Some(delta) = vertical_delta(key_event.code) {
                state.move_cursor(CURSOR_INVITATIONS, delta, len);
                return None;
            }
            let selected = state
                .session
                .data
                .invitations
                .get(state.cursor(CURSOR_INVITATIONS))
                .map(|i| i.id.clone());
            match key_event.code {
                KeyCode::Char('a') | KeyCode::Enter => selected.map(UserCommand::AcceptInvitation),
                KeyCode::Char('d') => selected.map(UserCommand::DeclineInvitation),
                _ => None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

fn handle_friends(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    if matches!(key_event.code, KeyCode::Tab | KeyCode::BackTab) {
        state.friends_tab = match state.friends_tab {
            FriendsTab::Friends => FriendsTab::Requests,
            FriendsTab::Requests => FriendsTab::Friends,
        };
        return None;
    }

    match state.friends_tab {
        FriendsTab::Friends => {
            if let Some(delta) = vertical_delta(key_event.code) {
                let len = state.filtered_friends().len();
                state.move_cursor(CURSOR_FRIENDS, delta, len);
                return None;
            }
            match key_event.code {
                KeyCode::Char('/') => {
                    state.editing = Some(EditTarget::FriendSearch);
                    None
                }
                KeyCode::Char('a') => {
                    state.editing = Some(EditTarget::AddFriend);
                    None
                }
                KeyCode::Esc => {
                    state.friend_query.clear();
                    state.reset_cursor(CURSOR_FRIENDS);
                    None
                }
                KeyCode::Char('x') | KeyCode::Delete => state
                    .filtered_friends()
                    .get(state.cursor(CURSOR_FRIENDS))
                    .map(|f| UserCommand::RemoveFriend(f.id.clone())),
                _ => None,
            }
        }
        FriendsTab::Requests => {
            if let Some(delta) = vertical_delta(key_event.code) {
                let len = state.ordered_requests().len();
                state.move_cursor(CURSOR_REQUESTS, delta, len);
                return None;
            }
            let requests = state.ordered_requests();
            let request = requests.get(state.cursor(CURSOR_REQUESTS))?;
            let id = request.id.clone();
            match (key_event.code, request.direction) {
                (KeyCode::Char('a'), RequestDirection::Incoming) => Some(UserCommand::AcceptRequest(id)),
                (KeyCode::Char('r'), RequestDirection::Incoming) => Some(UserCommand::RejectRequest(id)),
                (KeyCode::Char('c'), RequestDirection::Outgoing) => Some(UserCommand::CancelRequest(id)),
                _ => None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Create draft wizard
// ---------------------------------------------------------------------------

fn handle_create_draft(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('n') => {
            if state.wizard.next() {
                state.wizard_focus = 0;
            }
            return None;
        }
        KeyCode::Char('p') => {
            if state.wizard.previous() {
                state.wizard_focus = 0;
            }
            return None;
        }
        KeyCode::Esc => {
            if state.wizard.can_cancel() {
                state.close_create_draft();
                return Some(UserCommand::CancelCreateDraft);
            }
            return None;
        }
        KeyCode::Char('s') => {
            if !state.wizard.can_submit() {
                return None;
            }
            return match state.wizard.submit() {
                Ok(config) => {
                    state.close_create_draft();
                    Some(UserCommand::CreateDraft(Box::new(config)))
                }
                Err(e) => {
                    let mut steps: Vec<&str> = Vec::new();
                    for (field, _) in state.wizard.errors().iter() {
                        let label = field.step().label();
                        if !steps.contains(&label) {
                            steps.push(label);
                        }
                    }
                    state.toast = Some(format!("Cannot create draft: {e} ({})", steps.join(", ")));
                    None
                }
            };
        }
        _ => {}
    }

    if state.wizard.step() == WizardStep::Invitations {
        let len = state.session.data.friends.len();
        if let Some(delta) = vertical_delta(key_event.code) {
            state.move_cursor(CURSOR_INVITES, delta, len);
        } else if matches!(key_event.code, KeyCode::Char(' ') | KeyCode::Enter) {
            let friend_id = state
                .session
                .data
                .friends
                .get(state.cursor(CURSOR_INVITES))
                .map(|f| f.id.clone());
            if let Some(id) = friend_id {
                state.wizard.config_mut().toggle_invite(&id);
            }
        }
        return None;
    }

    let field_count = state.wizard_fields().len();
    match key_event.code {
        KeyCode::Down | KeyCode::Tab => {
            state.wizard_focus = (state.wizard_focus + 1) % field_count.max(1);
        }
        KeyCode::Up | KeyCode::BackTab => {
            state.wizard_focus = (state.wizard_focus + field_count.max(1) - 1) % field_count.max(1);
        }
        KeyCode::Enter => {
            if let Some(field) = state.focused_wizard_field() {
                match field.kind() {
                    FieldKind::Text | FieldKind::MultilineText | FieldKind::Number => {
                        state.editing = Some(EditTarget::Wizard(field));
                    }
                    FieldKind::Toggle => {
                        state.wizard.config_mut().toggle(field);
                    }
                    FieldKind::Choice | FieldKind::Selection => {}
                }
            }
        }
        KeyCode::Char(' ') => {
            if let Some(field) = state.focused_wizard_field() {
                state.wizard.config_mut().toggle(field);
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(field) = state.focused_wizard_field() {
                let forward = key_event.code == KeyCode::Right;
                state
                    .wizard
                    .config_mut()
                    .cycle_choice(field, forward, &state.session.data.templates);
            }
        }
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
