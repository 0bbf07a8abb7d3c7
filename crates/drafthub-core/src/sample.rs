// Built-in sample data and the optional JSON seed file that overrides it.
//
// Views never own data; when the integrator supplies nothing they fall back
// to these lists. A seed file may replace any subset of them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::model::*;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Every list the views render, plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub user: UserProfile,
    pub active_drafts: Vec<DraftSummary>,
    pub public_drafts: Vec<PublicDraft>,
    pub invitations: Vec<Invitation>,
    pub recent_drafts: Vec<RecentDraft>,
    pub templates: Vec<DraftTemplate>,
    pub friends: Vec<Friend>,
    pub friend_requests: Vec<FriendRequest>,
    pub notifications: Vec<Notification>,
}

impl Default for SeedData {
    fn default() -> Self {
        SeedData {
            user: default_user(),
            active_drafts: active_drafts(),
            public_drafts: public_drafts(),
            invitations: invitations(),
            recent_drafts: recent_drafts(),
            templates: templates(),
            friends: friends(),
            friend_requests: friend_requests(),
            notifications: notifications(),
        }
    }
}

/// Parse seed JSON; lists missing from the document keep the built-in sample.
pub fn parse_seed(text: &str) -> Result<SeedData, serde_json::Error> {
    serde_json::from_str(text)
}

/// Load a seed file from disk.
pub fn load_seed(path: &Path) -> Result<SeedData, SeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let seed = parse_seed(&text).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Seed data loaded from {}: {} drafts, {} friends, {} notifications",
        path.display(),
        seed.active_drafts.len(),
        seed.friends.len(),
        seed.notifications.len()
    );
    Ok(seed)
}

// ---------------------------------------------------------------------------
// Built-in lists
// ---------------------------------------------------------------------------

pub fn default_user() -> UserProfile {
    UserProfile {
        id: "user1".into(),
        name: "Alex Johnson".into(),
        email: "alex@example.com".into(),
        avatar: None,
    }
}

fn people(ids: &[(&str, &str)]) -> Vec<Participant> {
    ids.iter().map(|(id, name)| Participant::new(*id, *name)).collect()
}

pub fn active_drafts() -> Vec<DraftSummary> {
    vec![
        DraftSummary {
            id: "1".into(),
            title: "Fantasy Football 2023".into(),
            format: DraftFormat::Snake,
            status: DraftStatus::YourTurn,
            participants: people(&[
                ("user1", "Alex Johnson"),
                ("user2", "Maria Garcia"),
                ("user3", "James Wilson"),
                ("user4", "Sarah Brown"),
                ("user5", "David Lee"),
            ]),
            current_picker: None,
            time_remaining: None,
            your_turn_position: None,
            completion_percentage: 35,
        },
        DraftSummary {
            id: "2".into(),
            title: "Movie Draft Night".into(),
            format: DraftFormat::Linear,
            status: DraftStatus::InProgress,
            participants: people(&[
                ("user1", "Alex Johnson"),
                ("user2", "Maria Garcia"),
                ("user3", "James Wilson"),
                ("user4", "Sarah Brown"),
            ]),
            current_picker: Some(Participant::new("user3", "James Wilson")),
            time_remaining: Some(120),
            your_turn_position: Some(3),
            completion_percentage: 62,
        },
        DraftSummary {
            id: "3".into(),
            title: "NBA All-Stars".into(),
            format: DraftFormat::Auction,
            status: DraftStatus::Waiting,
            participants: people(&[
                ("user1", "Alex Johnson"),
                ("user2", "Maria Garcia"),
                ("user6", "Michael Taylor"),
            ]),
            current_picker: None,
            time_remaining: None,
            your_turn_position: None,
            completion_percentage: 0,
        },
        DraftSummary {
            id: "4".into(),
            title: "Book Club Picks".into(),
            format: DraftFormat::Snake,
            status: DraftStatus::Paused,
            participants: people(&[
                ("user1", "Alex Johnson"),
                ("user4", "Sarah Brown"),
                ("user5", "David Lee"),
                ("user7", "Emma Davis"),
                ("user8", "Robert Miller"),
                ("user9", "Jennifer White"),
            ]),
            current_picker: None,
            time_remaining: None,
            your_turn_position: None,
            completion_percentage: 75,
        },
    ]
}

pub fn public_drafts() -> Vec<PublicDraft> {
    let draft = |id: &str, title: &str, format, current, max, status, creator: &str, created: &str| {
        PublicDraft {
            id: id.into(),
            title: title.into(),
            format,
            participants: ParticipantCount { current, max },
            status,
            creator: creator.into(),
            created_at: created.into(),
        }
    };
    vec![
        draft("1", "Fantasy Football League 2023", DraftFormat::Snake, 8, 12,
            PublicDraftStatus::Waiting, "Alex Johnson", "2 hours ago"),
        draft("2", "NBA All-Stars Draft", DraftFormat::Linear, 6, 10,
            PublicDraftStatus::Waiting, "Maria Garcia", "1 hour ago"),
        draft("3", "Movie Night Picks", DraftFormat::Auction, 4, 8,
            PublicDraftStatus::InProgress, "James Wilson", "30 minutes ago"),
        draft("4", "Book Club Selections", DraftFormat::Snake, 5, 6,
            PublicDraftStatus::InProgress, "Sarah Brown", "45 minutes ago"),
    ]
}

pub fn invitations() -> Vec<Invitation> {
    vec![
        Invitation {
            id: "101".into(),
            title: "Fantasy Baseball 2023 - Private League".into(),
            from: "David Lee".into(),
            date: "1 hour ago".into(),
        },
        Invitation {
            id: "102".into(),
            title: "Summer Movie Draft".into(),
            from: "Emma Davis".into(),
            date: "3 hours ago".into(),
        },
    ]
}

pub fn recent_drafts() -> Vec<RecentDraft> {
    vec![
        RecentDraft {
            id: "101".into(),
            title: "Fantasy Football 2023".into(),
            date: "2023-08-15".into(),
            participants: 12,
            status: RecentDraftStatus::Completed,
        },
        RecentDraft {
            id: "102".into(),
            title: "Movie Draft Night".into(),
            date: "2023-09-03".into(),
            participants: 8,
            status: RecentDraftStatus::InProgress,
        },
        RecentDraft {
            id: "103".into(),
            title: "Book Club Picks".into(),
            date: "2023-09-10".into(),
            participants: 6,
            status: RecentDraftStatus::Completed,
        },
    ]
}

pub fn templates() -> Vec<DraftTemplate> {
    [
        ("template1", "Fantasy Football"),
        ("template2", "Fantasy Basketball"),
        ("template3", "Movie Draft"),
        ("template4", "Book Club Picks"),
    ]
    .into_iter()
    .map(|(id, name)| DraftTemplate {
        id: id.into(),
        name: name.into(),
    })
    .collect()
}

pub fn friends() -> Vec<Friend> {
    let friend = |id: &str, name: &str, status, last_active: Option<&str>| Friend {
        id: id.into(),
        name: name.into(),
        avatar: None,
        status,
        last_active: last_active.map(str::to_string),
    };
    vec![
        friend("user1", "Alex Johnson", Presence::Online, None),
        friend("user2", "Maria Garcia", Presence::InDraft, None),
        friend("user3", "James Wilson", Presence::Offline, Some("2 hours ago")),
        friend("user4", "Sarah Brown", Presence::Offline, Some("yesterday")),
        friend("user5", "David Lee", Presence::Online, None),
    ]
}

pub fn friend_requests() -> Vec<FriendRequest> {
    let request = |id: &str, name: &str, direction, timestamp: &str| FriendRequest {
        id: id.into(),
        name: name.into(),
        avatar: None,
        direction,
        timestamp: timestamp.into(),
    };
    vec![
        request("req1", "Michael Taylor", RequestDirection::Incoming, "2 hours ago"),
        request("req2", "Emma Davis", RequestDirection::Incoming, "1 day ago"),
        request("req3", "Robert Miller", RequestDirection::Outgoing, "3 hours ago"),
    ]
}

pub fn notifications() -> Vec<Notification> {
    let note = |id: &str, kind, title: &str, message: &str, time: &str, read| Notification {
        id: id.into(),
        kind,
        title: title.into(),
        message: message.into(),
        time: time.into(),
        read,
    };
    vec![
        note("1", NotificationKind::Invitation, "Draft Invitation",
            "John invited you to join \"Fantasy Football 2023\"", "5 minutes ago", false),
        note("2", NotificationKind::Turn, "Your Turn",
            "It's your turn to pick in \"NBA All-Stars Draft\"", "2 minutes ago", false),
        note("3", NotificationKind::Completion, "Draft Complete",
            "\"Movie Night Picks\" draft has been completed", "1 hour ago", true),
        note("4", NotificationKind::Friend, "Friend Request",
            "Sarah sent you a friend request", "3 hours ago", true),
        note("5", NotificationKind::Invitation, "Draft Invitation",
            "Mike invited you to join \"Book Club Picks\"", "1 day ago", true),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
