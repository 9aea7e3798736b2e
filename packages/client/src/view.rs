//! In-memory model of the chat panel.
//!
//! [`ChatView`] holds what the user currently sees: the login prompt, the
//! logged-in indicator, the channel label, the group sidebar and the message
//! log. Every mutation is also queued as a [`ViewChange`] so a screen can
//! render it incrementally.

use std::{fmt, sync::Arc};

use kaiwa_shared::time::{Clock, SystemClock};

/// One rendered element of the message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Chat message bubble
    Bubble {
        sender: String,
        content: String,
        own: bool,
        at: i64,
    },
    /// Status, error or channel-switch annotation
    System { text: String, at: i64 },
}

impl LogEntry {
    /// Label shown above a bubble: `You` for own messages, else the sender.
    pub fn label(&self) -> Option<&str> {
        match self {
            LogEntry::Bubble { own: true, .. } => Some("You"),
            LogEntry::Bubble { sender, .. } => Some(sender),
            LogEntry::System { .. } => None,
        }
    }

    pub fn is_bubble(&self) -> bool {
        matches!(self, LogEntry::Bubble { .. })
    }

    /// Bubble content or system text
    pub fn text(&self) -> &str {
        match self {
            LogEntry::Bubble { content, .. } => content,
            LogEntry::System { text, .. } => text,
        }
    }

    /// Unix timestamp (milliseconds) at which the entry was appended
    pub fn appended_at(&self) -> i64 {
        match self {
            LogEntry::Bubble { at, .. } | LogEntry::System { at, .. } => *at,
        }
    }
}

/// A single mutation of the view, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    LoginPromptHidden,
    LoggedIn(String),
    ChannelLabel(String),
    SidebarEntryAdded(String),
    LogCleared,
    Appended(LogEntry),
}

pub struct ChatView {
    clock: Arc<dyn Clock>,
    login_prompt_visible: bool,
    logged_in_as: Option<String>,
    channel_label: Option<String>,
    sidebar: Vec<String>,
    log: Vec<LogEntry>,
    changes: Vec<ViewChange>,
}

impl fmt::Debug for ChatView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatView")
            .field("login_prompt_visible", &self.login_prompt_visible)
            .field("logged_in_as", &self.logged_in_as)
            .field("channel_label", &self.channel_label)
            .field("sidebar", &self.sidebar)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ChatView {
    /// Create a fresh view with the login prompt showing
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            login_prompt_visible: true,
            logged_in_as: None,
            channel_label: None,
            sidebar: Vec::new(),
            log: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn login_prompt_visible(&self) -> bool {
        self.login_prompt_visible
    }

    pub fn logged_in_as(&self) -> Option<&str> {
        self.logged_in_as.as_deref()
    }

    pub fn channel_label(&self) -> Option<&str> {
        self.channel_label.as_deref()
    }

    /// Joined groups in insertion order
    pub fn sidebar(&self) -> &[String] {
        &self.sidebar
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.log
    }

    /// Number of bubbles currently in the log
    pub fn bubble_count(&self) -> usize {
        self.log.iter().filter(|e| e.is_bubble()).count()
    }

    pub fn hide_login_prompt(&mut self) {
        if self.login_prompt_visible {
            self.login_prompt_visible = false;
            self.changes.push(ViewChange::LoginPromptHidden);
        }
    }

    pub fn show_logged_in(&mut self, username: &str) {
        self.logged_in_as = Some(username.to_string());
        self.changes.push(ViewChange::LoggedIn(username.to_string()));
    }

    pub fn set_channel_label(&mut self, label: String) {
        self.channel_label = Some(label.clone());
        self.changes.push(ViewChange::ChannelLabel(label));
    }

    /// Add a group to the sidebar.
    ///
    /// # Returns
    ///
    /// `false` if the group was already listed (nothing changes)
    pub fn add_sidebar_entry(&mut self, group: &str) -> bool {
        if self.sidebar.iter().any(|g| g == group) {
            return false;
        }
        self.sidebar.push(group.to_string());
        self.changes.push(ViewChange::SidebarEntryAdded(group.to_string()));
        true
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.changes.push(ViewChange::LogCleared);
    }

    pub fn add_message_bubble(&mut self, sender: &str, content: &str, own: bool) {
        self.append(LogEntry::Bubble {
            sender: sender.to_string(),
            content: content.to_string(),
            own,
            at: self.clock.now_millis(),
        });
    }

    pub fn add_system_message(&mut self, text: impl Into<String>) {
        self.append(LogEntry::System {
            text: text.into(),
            at: self.clock.now_millis(),
        });
    }

    /// Drain the changes made since the last call
    pub fn take_changes(&mut self) -> Vec<ViewChange> {
        std::mem::take(&mut self.changes)
    }

    fn append(&mut self, entry: LogEntry) {
        self.log.push(entry.clone());
        self.changes.push(ViewChange::Appended(entry));
    }
}
