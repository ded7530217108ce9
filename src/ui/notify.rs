//! Transient notices, the terminal stand-in for toast notifications.

use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeKind { Info, Error }

#[derive(Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeKind::Error)
    }

    fn new(message: String, kind: NoticeKind) -> Self {
        Self { message, kind, expires_at: Instant::now() + NOTICE_TTL }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
