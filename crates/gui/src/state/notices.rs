//! User-visible notices (fetch degradations, mutation failures).
//!
//! Notices expire on their own; the status bar shows the most recent one.

use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warn,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Rolling log of recent notices
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<(Instant, Notice)>,
}

impl NoticeLog {
    pub fn push(&mut self, notice: Notice) {
        self.entries.push((Instant::now(), notice));
    }

    /// Drop notices older than their display window
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.entries.retain(|(at, _)| now.duration_since(*at) < NOTICE_TTL);
    }

    /// Most recent notice still on display
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.last().map(|(_, n)| n)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().map(|(_, n)| n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_most_recent() {
        let mut log = NoticeLog::default();
        log.push(Notice::info("uno"));
        log.push(Notice::error("dos"));
        assert_eq!(log.latest().unwrap().message, "dos");
        assert_eq!(log.latest().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_prune_keeps_fresh_entries() {
        let mut log = NoticeLog::default();
        log.push(Notice::warn("fresh"));
        log.prune();
        assert!(!log.is_empty());
    }
}
