//! Admin review of submitted membership applications.

use chrono::NaiveDate;

use super::audit::AuditAction;
use super::errors::{DomainError, DomainResult};
use super::models::{sequence_id, ApplicationRecord, ApplicationStatus, PlatformData, StatusFilter};

/// A validated application that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub age: u32,
    pub org_name: String,
    pub org_type: String,
    pub position: String,
    pub org_website: String,
    pub focus_areas: Vec<String>,
    pub motivation: String,
    pub experience: String,
    pub contribution: String,
    pub agree_terms: bool,
}

/// Outcome of a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: ApplicationStatus,
    pub current: ApplicationStatus,
}

/// Aggregate counts shown on the admin dashboard, computed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub active_events: usize,
}

/// Review operations over the application collection of a [`PlatformData`].
pub struct ApplicationReviewBoard<'a> {
    data: &'a mut PlatformData,
}

impl<'a> ApplicationReviewBoard<'a> {
    pub fn new(data: &'a mut PlatformData) -> Self {
        Self { data }
    }

    /// Read-only access to the same applications.
    pub fn queue(&self) -> ApplicationQueue<'_> {
        ApplicationQueue::new(&*self.data)
    }

    /// Applications matching `filter`, in submission order.
    pub fn list(&self, filter: StatusFilter) -> impl Iterator<Item = &ApplicationRecord> + Clone {
        self.queue().list(filter)
    }

    pub fn get_by_id(&self, id: &str) -> DomainResult<&ApplicationRecord> {
        self.queue().get_by_id(id)
    }

    /// Assigns the next `APP###` identifier and appends a pending record.
    ///
    /// Identifiers come from the collection size, so they would repeat if
    /// records were ever removed; records are never removed.
    pub fn register(
        &mut self,
        draft: ApplicationDraft,
        submitted_date: NaiveDate,
        actor: Option<&str>,
    ) -> &ApplicationRecord {
        let id = sequence_id("APP", self.data.applications.len() + 1);
        let record = ApplicationRecord {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            country: draft.country,
            age: draft.age,
            org_name: draft.org_name,
            org_type: draft.org_type,
            position: draft.position,
            org_website: draft.org_website,
            focus_areas: draft.focus_areas,
            motivation: draft.motivation,
            experience: draft.experience,
            contribution: draft.contribution,
            status: ApplicationStatus::Pending,
            submitted_date,
            agree_terms: draft.agree_terms,
        };

        tracing::info!(id = %record.id, "application submitted");
        self.data.audit_log.append(
            AuditAction::ApplicationSubmitted,
            format!("New application from {}", record.full_name()),
            actor,
        );
        self.data.applications.push(record);
        &self.data.applications[self.data.applications.len() - 1]
    }

    /// Overwrites the status of application `id`. Any status may follow any
    /// other.
    pub fn set_status(
        &mut self,
        id: &str,
        status: ApplicationStatus,
        actor: Option<&str>,
    ) -> DomainResult<StatusChange> {
        let record = self
            .data
            .applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or_else(|| DomainError::ApplicationNotFound(id.to_string()))?;

        let previous = record.status;
        record.status = status;

        let action = match status {
            ApplicationStatus::Accepted => AuditAction::ApplicationApproved,
            ApplicationStatus::Rejected => AuditAction::ApplicationRejected,
            _ => AuditAction::ApplicationStatusChanged,
        };
        let by = actor.unwrap_or(super::audit::SYSTEM_ACTOR);
        self.data
            .audit_log
            .append(action, format!("Application {} {} by {}", id, status, by), actor);

        tracing::info!(%id, %previous, current = %status, "application status changed");
        Ok(StatusChange { previous, current: status })
    }

    pub fn metrics(&self) -> DashboardMetrics {
        self.queue().metrics()
    }
}

/// Read-only review queries over a [`PlatformData`], usable where only a
/// shared borrow is available (rendering, export).
#[derive(Debug, Clone, Copy)]
pub struct ApplicationQueue<'a> {
    data: &'a PlatformData,
}

impl<'a> ApplicationQueue<'a> {
    pub fn new(data: &'a PlatformData) -> Self {
        Self { data }
    }

    /// Lazy, cloneable view of the applications matching `filter`.
    pub fn list(self, filter: StatusFilter) -> impl Iterator<Item = &'a ApplicationRecord> + Clone {
        self.data
            .applications
            .iter()
            .filter(move |app| filter.matches(app.status))
    }

    pub fn get_by_id(self, id: &str) -> DomainResult<&'a ApplicationRecord> {
        self.data
            .applications
            .iter()
            .find(|app| app.id == id)
            .ok_or_else(|| DomainError::ApplicationNotFound(id.to_string()))
    }

    pub fn metrics(self) -> DashboardMetrics {
        let count = |status| {
            self.data
                .applications
                .iter()
                .filter(|app| app.status == status)
                .count()
        };
        DashboardMetrics {
            total: self.data.applications.len(),
            pending: count(ApplicationStatus::Pending),
            accepted: count(ApplicationStatus::Accepted),
            active_events: self.data.events.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_sample_data;

    fn draft(first: &str, last: &str) -> ApplicationDraft {
        ApplicationDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "a@x.com".to_string(),
            phone: "+250788000000".to_string(),
            country: "Rwanda".to_string(),
            age: 25,
            org_name: "Hub".to_string(),
            org_type: "NGO".to_string(),
            position: "Lead".to_string(),
            org_website: String::new(),
            focus_areas: vec!["Gender".to_string()],
            motivation: "m".to_string(),
            experience: "e".to_string(),
            contribution: "c".to_string(),
            agree_terms: true,
        }
    }

    fn seeded() -> PlatformData {
        let mut data = PlatformData::default();
        seed_sample_data(&mut data);
        data
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut data = PlatformData::default();
        let mut board = ApplicationReviewBoard::new(&mut data);
        let first = board.register(draft("Alice", "Kim"), today(), None).id.clone();
        let second = board.register(draft("Bob", "Lee"), today(), None).id.clone();
        assert_eq!(first, "APP001");
        assert_eq!(second, "APP002");
        assert_eq!(
            data.audit_log.front().unwrap().description,
            "New application from Bob Lee"
        );
    }

    #[test]
    fn test_list_all_preserves_insertion_order() {
        let mut data = seeded();
        let board = ApplicationReviewBoard::new(&mut data);
        let ids: Vec<_> = board.list(StatusFilter::All).map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["APP001", "APP002", "APP003"]);
    }

    #[test]
    fn test_list_filters_by_status() {
        let mut data = seeded();
        let board = ApplicationReviewBoard::new(&mut data);
        let accepted: Vec<_> = board.list(ApplicationStatus::Accepted.into()).collect();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, "APP003");
    }

    #[test]
    fn test_get_by_id_reports_not_found() {
        let mut data = seeded();
        let board = ApplicationReviewBoard::new(&mut data);
        assert_eq!(board.get_by_id("APP002").unwrap().first_name, "David");
        assert_eq!(
            board.get_by_id("APP999").unwrap_err(),
            DomainError::ApplicationNotFound("APP999".to_string())
        );
    }

    #[test]
    fn test_accepting_records_approval() {
        let mut data = seeded();
        let mut board = ApplicationReviewBoard::new(&mut data);
        let change = board
            .set_status("APP001", ApplicationStatus::Accepted, Some("Admin User"))
            .unwrap();

        assert_eq!(change.previous, ApplicationStatus::Pending);
        assert_eq!(board.get_by_id("APP001").unwrap().status, ApplicationStatus::Accepted);
        let front = data.audit_log.front().unwrap();
        assert_eq!(front.action, AuditAction::ApplicationApproved);
        assert_eq!(front.actor, "Admin User");
        assert_eq!(front.description, "Application APP001 accepted by Admin User");
    }

    #[test]
    fn test_audit_action_per_target_status() {
        let mut data = seeded();
        let mut board = ApplicationReviewBoard::new(&mut data);
        board.set_status("APP002", ApplicationStatus::Rejected, None).unwrap();
        assert_eq!(
            board.data.audit_log.front().unwrap().action,
            AuditAction::ApplicationRejected
        );
        board.set_status("APP002", ApplicationStatus::UnderReview, None).unwrap();
        assert_eq!(
            board.data.audit_log.front().unwrap().action,
            AuditAction::ApplicationStatusChanged
        );
    }

    #[test]
    fn test_filters_follow_status_change() {
        let mut data = seeded();
        let mut board = ApplicationReviewBoard::new(&mut data);
        board.set_status("APP003", ApplicationStatus::Pending, None).unwrap();

        assert!(board.list(ApplicationStatus::Pending.into()).any(|a| a.id == "APP003"));
        assert!(!board.list(ApplicationStatus::Accepted.into()).any(|a| a.id == "APP003"));
    }

    #[test]
    fn test_terminal_statuses_can_be_reopened() {
        let mut data = seeded();
        let mut board = ApplicationReviewBoard::new(&mut data);
        board.set_status("APP001", ApplicationStatus::Rejected, None).unwrap();
        let change = board.set_status("APP001", ApplicationStatus::Accepted, None).unwrap();
        assert_eq!(change.previous, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_unknown_id_mutates_nothing() {
        let mut data = seeded();
        let before = data.clone();
        let mut board = ApplicationReviewBoard::new(&mut data);
        let err = board
            .set_status("APP404", ApplicationStatus::Accepted, None)
            .unwrap_err();
        assert_eq!(err, DomainError::ApplicationNotFound("APP404".to_string()));
        assert_eq!(data, before);
    }

    #[test]
    fn test_metrics_recomputed_after_change() {
        let mut data = seeded();
        let mut board = ApplicationReviewBoard::new(&mut data);
        assert_eq!(
            board.metrics(),
            DashboardMetrics { total: 3, pending: 1, accepted: 1, active_events: 2 }
        );
        board.set_status("APP001", ApplicationStatus::Accepted, None).unwrap();
        let metrics = board.metrics();
        assert_eq!(metrics.pending, 0);
        assert_eq!(metrics.accepted, 2);
    }

    #[test]
    fn test_shared_queue_sees_board_changes() {
        let mut data = seeded();
        ApplicationReviewBoard::new(&mut data)
            .set_status("APP002", ApplicationStatus::Accepted, Some("Admin User"))
            .unwrap();

        let queue = ApplicationQueue::new(&data);
        let accepted: Vec<_> = queue
            .list(ApplicationStatus::Accepted.into())
            .map(|app| app.id.as_str())
            .collect();
        assert_eq!(accepted, vec!["APP002", "APP003"]);
        assert_eq!(queue.get_by_id("APP002").unwrap().status, ApplicationStatus::Accepted);
        assert!(queue.get_by_id("APP404").is_err());
        assert_eq!(queue.metrics().accepted, 2);
    }
}
