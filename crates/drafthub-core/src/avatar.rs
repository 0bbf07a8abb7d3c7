// Avatar helpers: identicon fallback URLs and initials.

/// Default identicon endpoint used when a user has no avatar of their own.
pub const DEFAULT_IDENTICON_ENDPOINT: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Resolve the avatar URL for a user.
///
/// A non-empty explicit avatar wins; otherwise the identicon endpoint is keyed
/// by the user identifier, so the same user always gets the same image.
pub fn avatar_url(endpoint: &str, user_id: &str, avatar: Option<&str>) -> String {
    match avatar {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => format!("{}?seed={}", endpoint.trim_end_matches('/'), user_id),
    }
}

/// Initials of each word of a display name, e.g. "Alex Johnson" -> "AJ".
///
/// Falls back to "?" for blank names.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}
