// Display-oriented view models: drafts, friends, requests, notifications.
//
// Everything here is transient session data handed to the views. Enum values
// serialize in kebab-case so seed files can use "in-draft", "your-turn", ...

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Draft format
// ---------------------------------------------------------------------------

/// How pick order is decided in a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraftFormat {
    /// Pick order reverses each round.
    #[default]
    Snake,
    /// Pick order is identical each round.
    Linear,
    /// Participants bid from a budget instead of taking fixed turns.
    Auction,
}

impl DraftFormat {
    pub const ALL: [DraftFormat; 3] = [DraftFormat::Snake, DraftFormat::Linear, DraftFormat::Auction];

    /// Short name, e.g. "Snake".
    pub fn display_str(&self) -> &'static str {
        match self {
            DraftFormat::Snake => "Snake",
            DraftFormat::Linear => "Linear",
            DraftFormat::Auction => "Auction",
        }
    }

    /// Card label, e.g. "Snake Draft".
    pub fn label(&self) -> String {
        format!("{} Draft", self.display_str())
    }

    /// One-line explanation shown under the format selector.
    pub fn description(&self) -> &'static str {
        match self {
            DraftFormat::Snake => "Snake: Draft order reverses each round (1→10, 10→1)",
            DraftFormat::Linear => "Linear: Same draft order each round (1→10, 1→10)",
            DraftFormat::Auction => "Auction: Participants bid on items using a budget",
        }
    }
}

impl fmt::Display for DraftFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Active drafts
// ---------------------------------------------------------------------------

/// Status of a draft the user is participating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraftStatus {
    Waiting,
    InProgress,
    YourTurn,
    Paused,
}

impl DraftStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DraftStatus::YourTurn => "Your Turn!",
            DraftStatus::InProgress => "In Progress",
            DraftStatus::Waiting => "Waiting to Start",
            DraftStatus::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

/// Card data for one active draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub title: String,
    pub format: DraftFormat,
    pub status: DraftStatus,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub current_picker: Option<Participant>,
    /// Seconds left for the current picker. Inert: nothing ticks it down.
    #[serde(default)]
    pub time_remaining: Option<u32>,
    /// Number of picks until the user's turn.
    #[serde(default)]
    pub your_turn_position: Option<u32>,
    pub completion_percentage: u8,
}

impl DraftSummary {
    /// Completion clamped to a displayable percentage.
    pub fn progress(&self) -> u16 {
        u16::from(self.completion_percentage.min(100))
    }

    /// "James Wilson is picking" line, only while in progress with a picker.
    pub fn picker_line(&self) -> Option<String> {
        if self.status != DraftStatus::InProgress {
            return None;
        }
        let picker = self.current_picker.as_ref()?;
        let mut line = format!("{} is picking", picker.name);
        if let Some(secs) = self.time_remaining {
            line.push_str(&format!("  ⏱ {}", format_countdown(secs)));
        }
        Some(line)
    }

    /// "Your turn in: 3 picks", only while in progress with a positive position.
    pub fn turn_line(&self) -> Option<String> {
        if self.status != DraftStatus::InProgress {
            return None;
        }
        match self.your_turn_position {
            Some(n) if n > 0 => Some(format!(
                "Your turn in: {} {}",
                n,
                if n == 1 { "pick" } else { "picks" }
            )),
            _ => None,
        }
    }

    /// Label of the card's primary action.
    pub fn action_label(&self) -> &'static str {
        if self.status == DraftStatus::YourTurn {
            "Make Your Pick"
        } else {
            "Enter Draft Room"
        }
    }

    /// Participants shown as avatars (first three) and the overflow count.
    pub fn participant_preview(&self) -> (&[Participant], usize) {
        let shown = self.participants.len().min(3);
        (&self.participants[..shown], self.participants.len() - shown)
    }
}

/// Format a countdown in seconds as `m:ss`.
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

// ---------------------------------------------------------------------------
// Joinable drafts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicDraftStatus {
    Waiting,
    InProgress,
}

impl PublicDraftStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PublicDraftStatus::Waiting => "Waiting",
            PublicDraftStatus::InProgress => "In Progress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantCount {
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDraft {
    pub id: String,
    pub title: String,
    pub format: DraftFormat,
    pub participants: ParticipantCount,
    pub status: PublicDraftStatus,
    pub creator: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    pub title: String,
    pub from: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecentDraftStatus {
    Completed,
    InProgress,
}

/// A draft from the user's history, listed under the draft options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDraft {
    pub id: String,
    pub title: String,
    pub date: String,
    pub participants: u32,
    pub status: RecentDraftStatus,
}

impl RecentDraft {
    pub fn status_label(&self) -> &'static str {
        match self.status {
            RecentDraftStatus::Completed => "Completed",
            RecentDraftStatus::InProgress => "In Progress",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.status {
            RecentDraftStatus::Completed => "View Results",
            RecentDraftStatus::InProgress => "Continue Draft",
        }
    }
}

/// A predefined item pool offered by the creation wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTemplate {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presence {
    Online,
    Offline,
    InDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub status: Presence,
    #[serde(default)]
    pub last_active: Option<String>,
}

impl Friend {
    /// Secondary line under the friend's name.
    pub fn presence_line(&self) -> String {
        match self.status {
            Presence::Online => "Online".to_string(),
            Presence::InDraft => "In a draft".to_string(),
            Presence::Offline => format!(
                "Last seen {}",
                self.last_active.as_deref().unwrap_or("recently")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "status")]
    pub direction: RequestDirection,
    pub timestamp: String,
}

/// Split requests into (incoming, outgoing), preserving order.
pub fn partition_requests(requests: &[FriendRequest]) -> (Vec<&FriendRequest>, Vec<&FriendRequest>) {
    requests
        .iter()
        .partition(|r| r.direction == RequestDirection::Incoming)
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Invitation,
    Turn,
    Completion,
    Friend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(status: DraftStatus) -> DraftSummary {
        DraftSummary {
            id: "2".into(),
            title: "Movie Draft Night".into(),
            format: DraftFormat::Linear,
            status,
            participants: (1..=5)
                .map(|i| Participant::new(format!("user{i}"), format!("User {i}")))
                .collect(),
            current_picker: Some(Participant::new("user3", "James Wilson")),
            time_remaining: Some(120),
            your_turn_position: Some(3),
            completion_percentage: 62,
        }
    }

    #[test]
    fn countdown_formats_minutes_and_padded_seconds() {
        assert_eq!(format_countdown(120), "2:00");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(9), "0:09");
    }

    #[test]
    fn picker_line_only_while_in_progress() {
        let d = draft(DraftStatus::InProgress);
        assert_eq!(d.picker_line().unwrap(), "James Wilson is picking  ⏱ 2:00");
        assert!(draft(DraftStatus::Paused).picker_line().is_none());
    }

    #[test]
    fn turn_line_pluralizes() {
        let mut d = draft(DraftStatus::InProgress);
        assert_eq!(d.turn_line().unwrap(), "Your turn in: 3 picks");
        d.your_turn_position = Some(1);
        assert_eq!(d.turn_line().unwrap(), "Your turn in: 1 pick");
        d.your_turn_position = Some(0);
        assert!(d.turn_line().is_none());
    }

    #[test]
    fn participant_preview_caps_at_three() {
        let d = draft(DraftStatus::Waiting);
        let (shown, extra) = d.participant_preview();
        assert_eq!(shown.len(), 3);
        assert_eq!(extra, 2);
    }

    #[test]
    fn action_label_depends_on_turn() {
        assert_eq!(draft(DraftStatus::YourTurn).action_label(), "Make Your Pick");
        assert_eq!(draft(DraftStatus::Waiting).action_label(), "Enter Draft Room");
    }

    #[test]
    fn progress_is_clamped() {
        let mut d = draft(DraftStatus::Waiting);
        d.completion_percentage = 250;
        assert_eq!(d.progress(), 100);
    }

    #[test]
    fn presence_line_falls_back_to_recently() {
        let mut f = Friend {
            id: "user3".into(),
            name: "James Wilson".into(),
            avatar: None,
            status: Presence::Offline,
            last_active: Some("2 hours ago".into()),
        };
        assert_eq!(f.presence_line(), "Last seen 2 hours ago");
        f.last_active = None;
        assert_eq!(f.presence_line(), "Last seen recently");
        f.status = Presence::InDraft;
        assert_eq!(f.presence_line(), "In a draft");
    }

    #[test]
    fn partition_requests_by_direction() {
        let reqs = vec![
            FriendRequest {
                id: "req1".into(),
                name: "Michael Taylor".into(),
                avatar: None,
                direction: RequestDirection::Incoming,
                timestamp: "2 hours ago".into(),
            },
            FriendRequest {
                id: "req3".into(),
                name: "Robert Miller".into(),
                avatar: None,
                direction: RequestDirection::Outgoing,
                timestamp: "3 hours ago".into(),
            },
        ];
        let (incoming, outgoing) = partition_requests(&reqs);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].id, "req1");
        assert_eq!(outgoing[0].id, "req3");
    }

    #[test]
    fn kebab_case_statuses_parse() {
        let f: Friend =
            serde_json::from_str(r#"{"id":"u","name":"N","status":"in-draft"}"#).unwrap();
        assert_eq!(f.status, Presence::InDraft);
        let s: DraftStatus = serde_json::from_str(r#""your-turn""#).unwrap();
        assert_eq!(s, DraftStatus::YourTurn);
    }

    #[test]
    fn notification_uses_type_key() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"1","type":"turn","title":"Your Turn","message":"m","time":"now","read":false}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Turn);
        assert_eq!(unread_count(&[n]), 1);
    }
}
