//! Bounded, most-recent-first audit trail of platform mutations.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries retained; older entries are dropped first.
pub const AUDIT_LOG_CAPACITY: usize = 50;

/// Actor recorded when nobody is signed in.
pub const SYSTEM_ACTOR: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ApplicationSubmitted,
    ApplicationApproved,
    ApplicationRejected,
    ApplicationStatusChanged,
    EventCreated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ApplicationSubmitted => "application_submitted",
            AuditAction::ApplicationApproved => "application_approved",
            AuditAction::ApplicationRejected => "application_rejected",
            AuditAction::ApplicationStatusChanged => "application_status_changed",
            AuditAction::EventCreated => "event_created",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub action: AuditAction,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "user")]
    pub actor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: VecDeque<AuditLogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry stamped with the current time.
    pub fn append(
        &mut self,
        action: AuditAction,
        description: impl Into<String>,
        actor: Option<&str>,
    ) -> &AuditLogEntry {
        self.append_at(action, description, actor, Utc::now())
    }

    /// Records an entry stamped with `now`, inserting it at the front and
    /// truncating the log to [`AUDIT_LOG_CAPACITY`].
    pub fn append_at(
        &mut self,
        action: AuditAction,
        description: impl Into<String>,
        actor: Option<&str>,
        now: DateTime<Utc>,
    ) -> &AuditLogEntry {
        let entry = AuditLogEntry {
            id: self.next_id(now),
            action,
            description: description.into(),
            timestamp: now,
            actor: actor.unwrap_or(SYSTEM_ACTOR).to_string(),
        };
        tracing::debug!(id = %entry.id, action = %entry.action, "audit entry recorded");

        self.entries.push_front(entry);
        self.entries.truncate(AUDIT_LOG_CAPACITY);
        &self.entries[0]
    }

    /// Returns up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &AuditLogEntry> + Clone {
        self.entries.iter().take(n)
    }

    pub fn front(&self) -> Option<&AuditLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Millisecond ids, bumped past the newest entry so two appends in the
    // same millisecond still get distinct ids.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        if let Some(last) = self.entries.front().and_then(|e| parse_log_millis(&e.id)) {
            millis = millis.max(last + 1);
        }
        format!("LOG{}", millis)
    }
}

fn parse_log_millis(id: &str) -> Option<i64> {
    id.strip_prefix("LOG")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_append_inserts_at_front() {
        let mut log = AuditLog::new();
        log.append(AuditAction::ApplicationSubmitted, "first", None);
        log.append(AuditAction::EventCreated, "second", Some("Admin User"));

        let front = log.front().unwrap();
        assert_eq!(front.description, "second");
        assert_eq!(front.actor, "Admin User");
        assert_eq!(log.recent(10).last().unwrap().actor, SYSTEM_ACTOR);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = AuditLog::new();
        for i in 1..=51 {
            log.append(AuditAction::ApplicationStatusChanged, format!("entry {}", i), None);
            assert!(log.len() <= AUDIT_LOG_CAPACITY);
        }

        let recent: Vec<_> = log.recent(50).map(|e| e.description.clone()).collect();
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0], "entry 51");
        assert_eq!(recent[49], "entry 2");
        assert!(!recent.contains(&"entry 1".to_string()));
    }

    #[test]
    fn test_ids_unique_within_same_instant() {
        let mut log = AuditLog::new();
        let now = Utc::now();
        for _ in 0..5 {
            log.append_at(AuditAction::EventCreated, "same instant", None, now);
        }
        let ids: HashSet<_> = log.recent(5).map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| id.starts_with("LOG")));
    }

    #[test]
    fn test_recent_is_restartable() {
        let mut log = AuditLog::new();
        log.append(AuditAction::ApplicationApproved, "a", None);
        log.append(AuditAction::ApplicationRejected, "b", None);
        let view = log.recent(1);
        assert_eq!(view.clone().count(), 1);
        assert_eq!(view.count(), 1);
    }

    #[test]
    fn test_legacy_user_field_is_read_as_actor() {
        let json = r#"[{"id":"LOG1","action":"event_created","description":"x",
            "timestamp":"2026-01-01T00:00:00Z","user":"Admin User"}]"#;
        let log: AuditLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.front().unwrap().actor, "Admin User");
    }
}
