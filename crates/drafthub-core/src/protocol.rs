// Messages between the views and the orchestrator.
//
// `UserCommand` is the set of callbacks the views fire (view -> app). Views
// never wait on a reply; the orchestrator answers, if at all, by pushing a
// fresh `UiUpdate::Snapshot`.

use crate::model::Notification;
use crate::sample::SeedData;
use crate::validation::{LoginForm, SignupForm};
use crate::wizard::DraftConfig;

/// Callbacks fired by the views.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Login(LoginForm),
    Signup(SignupForm),
    Logout,
    JoinByCode(String),
    JoinPublicDraft(String),
    AcceptInvitation(String),
    DeclineInvitation(String),
    EnterDraftRoom(String),
    AcceptRequest(String),
    RejectRequest(String),
    CancelRequest(String),
    RemoveFriend(String),
    SendRequest(String),
    NotificationClick(Notification),
    MarkAllAsRead,
    CreateDraft(Box<DraftConfig>),
    CancelCreateDraft,
    Quit,
}

impl UserCommand {
    /// Short name for log lines; never includes passwords.
    pub fn name(&self) -> &'static str {
        match self {
            UserCommand::Login(_) => "login",
            UserCommand::Signup(_) => "signup",
            UserCommand::Logout => "logout",
            UserCommand::JoinByCode(_) => "join_by_code",
            UserCommand::JoinPublicDraft(_) => "join_public_draft",
            UserCommand::AcceptInvitation(_) => "accept_invitation",
            UserCommand::DeclineInvitation(_) => "decline_invitation",
            UserCommand::EnterDraftRoom(_) => "enter_draft_room",
            UserCommand::AcceptRequest(_) => "accept_request",
            UserCommand::RejectRequest(_) => "reject_request",
            UserCommand::CancelRequest(_) => "cancel_request",
            UserCommand::RemoveFriend(_) => "remove_friend",
            UserCommand::SendRequest(_) => "send_request",
            UserCommand::NotificationClick(_) => "notification_click",
            UserCommand::MarkAllAsRead => "mark_all_as_read",
            UserCommand::CreateDraft(_) => "create_draft",
            UserCommand::CancelCreateDraft => "cancel_create_draft",
            UserCommand::Quit => "quit",
        }
    }
}

/// Everything the views render that they do not own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub data: SeedData,
}

/// Updates pushed from the orchestrator to the views.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Snapshot(Box<SessionSnapshot>),
    /// One-line status message for the help bar.
    Toast(String),
}
