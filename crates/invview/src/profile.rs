#![forbid(unsafe_code)]

//! Player profile record.

/// A player's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub display_name: String,
    pub user_id: u64,
    pub status: String,
    /// Join date, already formatted for display.
    pub joined: String,
    pub friends: u32,
    pub followers: u32,
    pub following: u32,
    pub online: bool,
    /// Glyph standing in for the avatar image.
    pub avatar: String,
}

impl Profile {
    /// Online indicator text.
    pub fn presence_label(&self) -> &'static str {
        if self.online { "Online" } else { "Offline" }
    }
}

/// Compact counter formatting: `950`, `1.3K`, `12K`, `2.1M`.
pub fn format_count(n: u32) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=9_999 => format_scaled(n, 1_000, "K"),
        10_000..=999_999 => format!("{}K", n / 1_000),
        _ => format_scaled(n, 1_000_000, "M"),
    }
}

fn format_scaled(n: u32, unit: u32, suffix: &str) -> String {
    let whole = n / unit;
    let tenth = (n % unit) / (unit / 10);
    if tenth == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{tenth}{suffix}")
    }
}
