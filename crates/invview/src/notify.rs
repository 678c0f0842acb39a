#![forbid(unsafe_code)]

//! Transient notifications ("toasts").

use std::collections::VecDeque;

use crate::source::FetchError;

/// Most toasts kept on screen at once.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Failure,
        }
    }

    /// Submit with a blank username.
    pub fn empty_username() -> Self {
        Self::failure("Enter a username", "Please provide a player username")
    }

    pub fn loaded(count: usize, username: &str) -> Self {
        Self::success(
            "Inventory loaded",
            format!("Found {count} items for {username}"),
        )
    }

    pub fn fetch_failed(err: &FetchError) -> Self {
        Self::failure("Search failed", err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    notice: Notice,
    remaining: u32,
}

/// Newest-first stack of notices that expire after a number of ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
    ttl_ticks: u32,
}

impl ToastStack {
    pub fn new(ttl_ticks: u32) -> Self {
        Self {
            toasts: VecDeque::with_capacity(MAX_VISIBLE),
            ttl_ticks: ttl_ticks.max(1),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.toasts.push_front(Toast {
            notice,
            remaining: self.ttl_ticks,
        });
        self.toasts.truncate(MAX_VISIBLE);
    }

    /// Age every toast by one tick and drop the expired ones.
    ///
    /// Returns `true` if anything was removed.
    pub fn tick(&mut self) -> bool {
        let before = self.toasts.len();
        for toast in &mut self.toasts {
            toast.remaining = toast.remaining.saturating_sub(1);
        }
        self.toasts.retain(|t| t.remaining > 0);
        self.toasts.len() != before
    }

    /// Notices, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.toasts.iter().map(|t| &t.notice)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
