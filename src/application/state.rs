//! Application state management for the membership portal.
//!
//! This module owns the platform data and the UI state, and runs every user
//! action to completion: validate, mutate, persist the whole snapshot.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::domain::{
    ApplicationQueue, ApplicationRecord, ApplicationReviewBoard, ApplicationStatus, ApplicationWizard, CalendarCursor,
    DashboardMetrics, DomainError, EventDraft, FieldId, InMemoryDirectory, OpportunityRecord, Page,
    PlatformData, ReviewSummary, Role, SessionUser, StatusFilter, UserDirectory,
    FOCUS_AREA_OPTIONS, authenticate, check_access, create_event,
    filter_opportunities, filter_resources, home_page, opportunity_categories, resource_categories,
    seed_sample_data, step_fields, ResourceEntry, RESOURCE_LIBRARY,
};
use crate::infrastructure::{
    AppConfig, ApplicationCsvExporter, KeyValueStore, MemoryStore, PlatformRepository,
};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popups are
/// drawn on top of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Page navigation and page shortcuts
    Normal,
    /// Typing into the sign-in form
    Login,
    /// Filling in the application wizard
    Wizard,
    /// Typing into the new-event form
    EventForm,
    /// Application detail popup on the admin dashboard
    ApplicationDetail,
    /// Help screen is displayed
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient message that dismisses itself after a while.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use yan_portal::application::{App, AppMode};
/// use yan_portal::domain::Page;
///
/// let app = App::default();
/// assert_eq!(app.page, Page::Landing);
/// assert_eq!(app.mode, AppMode::Normal);
/// ```
pub struct App {
    repository: PlatformRepository<Box<dyn KeyValueStore>>,
    directory: Box<dyn UserDirectory>,
    /// All persisted collections
    pub data: PlatformData,
    /// Signed-in user, if any
    pub session: Option<SessionUser>,
    /// Page currently displayed
    pub page: Page,
    /// Current input mode
    pub mode: AppMode,
    pub wizard: ApplicationWizard,
    /// Index of the focused input within the current wizard step
    pub wizard_focus: usize,
    /// Highlighted entry of the focus-area checklist
    pub focus_area_cursor: usize,
    /// Summary shown on the review step
    pub review_summary: Option<ReviewSummary>,
    pub login: LoginForm,
    pub event_draft: EventDraft,
    pub event_focus: usize,
    /// Status filter of the admin application table
    pub status_filter: StatusFilter,
    /// Selected row of the filtered application table
    pub selected_application: usize,
    /// Application shown in the detail popup
    pub detail_id: Option<String>,
    pub opportunity_category: String,
    pub resource_category: &'static str,
    pub calendar: CalendarCursor,
    pub notice: Option<Notice>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Number of audit entries shown on the dashboard
    pub audit_preview: usize,
    notice_duration: Duration,
    export_dir: PathBuf,
}

impl Default for App {
    fn default() -> Self {
        Self::new(
            Box::new(MemoryStore::new()),
            Box::new(InMemoryDirectory::demo()),
            &AppConfig::default(),
        )
    }
}

impl App {
    /// Loads persisted state from `store`, seeding sample data into empty
    /// collections and restoring any saved session.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        directory: Box<dyn UserDirectory>,
        config: &AppConfig,
    ) -> Self {
        let repository = PlatformRepository::new(store);
        let loaded = repository.load_data();
        let session = repository.load_session();

        let mut app = Self {
            repository,
            directory,
            data: loaded.value,
            session: session.value,
            page: Page::Landing,
            mode: AppMode::Normal,
            wizard: ApplicationWizard::new(),
            wizard_focus: 0,
            focus_area_cursor: 0,
            review_summary: None,
            login: LoginForm::default(),
            event_draft: EventDraft::default(),
            event_focus: 0,
            status_filter: StatusFilter::All,
            selected_application: 0,
            detail_id: None,
            opportunity_category: "all".to_string(),
            resource_category: "all",
            calendar: CalendarCursor::containing(Utc::now().date_naive()),
            notice: None,
            help_scroll: 0,
            audit_preview: config.ui.audit_preview,
            notice_duration: Duration::from_secs(config.ui.notice_seconds),
            export_dir: config.storage.data_dir.clone(),
        };

        // An unreadable document is kept on disk until the first real change,
        // and a copy survives that change.
        let data_unreadable = loaded.diagnostic.is_some();
        if data_unreadable {
            if let Err(err) = app.repository.preserve_unreadable_data() {
                tracing::error!(error = %err, "failed to keep unreadable platform data");
            }
        }
        if let Some(err) = loaded.diagnostic.or(session.diagnostic) {
            app.notify(NoticeKind::Error, format!("Stored data unavailable, starting empty: {}", err));
        }
        if seed_sample_data(&mut app.data) && !data_unreadable {
            app.persist();
        }
        app
    }

    fn actor(&self) -> Option<&str> {
        self.session.as_ref().map(|user| user.name.as_str())
    }

    fn persist(&mut self) {
        if let Err(err) = self.repository.save_data(&self.data) {
            tracing::error!(error = %err, "failed to save platform data");
            self.notify(NoticeKind::Error, format!("Save failed: {}", err));
        }
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            expires_at: Instant::now() + self.notice_duration,
        });
    }

    fn report(&mut self, err: &DomainError) {
        self.notify(NoticeKind::Error, err.to_string());
    }

    /// Drops the notice once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }

    // ---- navigation -------------------------------------------------------

    /// Opens `page`, falling back to the landing page when the current user
    /// may not see it.
    pub fn show_page(&mut self, page: Page) {
        let page = match check_access(page, self.session.as_ref()) {
            Ok(()) => page,
            Err(err) => {
                self.report(&err);
                Page::Landing
            }
        };
        tracing::debug!(%page, "show page");

        self.page = page;
        self.mode = match page {
            Page::Apply => AppMode::Wizard,
            Page::Login => AppMode::Login,
            _ => AppMode::Normal,
        };
        if page == Page::AdminDashboard {
            self.clamp_selection();
        }
    }

    /// The signed-in user's home page, or the login page for visitors.
    pub fn show_dashboard(&mut self) {
        match self.session.as_ref().map(|user| user.role) {
            Some(role) => self.show_page(home_page(role)),
            None => self.show_page(Page::Login),
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ---- session ----------------------------------------------------------

    pub fn submit_login(&mut self) {
        let result = authenticate(self.directory.as_ref(), &self.login.email, &self.login.password);
        self.login.password.clear();

        match result {
            Ok(user) => {
                if let Err(err) = self.repository.save_session(&user) {
                    tracing::error!(error = %err, "failed to save session");
                }
                tracing::info!(email = %user.email, role = %user.role, "signed in");
                let role = user.role;
                self.session = Some(user);
                self.login = LoginForm::default();
                self.show_page(home_page(role));
                self.notify(NoticeKind::Success, "Login successful!");
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.repository.clear_session() {
            tracing::error!(error = %err, "failed to clear session");
        }
        if let Some(user) = self.session.take() {
            tracing::info!(email = %user.email, "signed out");
        }
        self.show_page(Page::Landing);
    }

    pub fn login_type(&mut self, c: char) {
        self.login.focused_mut().push(c);
    }

    pub fn login_backspace(&mut self) {
        self.login.focused_mut().pop();
    }

    pub fn login_toggle_field(&mut self) {
        self.login.focus = match self.login.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    // ---- application wizard -----------------------------------------------

    /// Input focused on the current wizard step; `None` on the review step.
    pub fn focused_field(&self) -> Option<FieldId> {
        step_fields(self.wizard.current_step())
            .get(self.wizard_focus)
            .copied()
    }

    pub fn wizard_next_field(&mut self) {
        let count = step_fields(self.wizard.current_step()).len();
        if count > 0 {
            self.wizard_focus = (self.wizard_focus + 1) % count;
        }
    }

    pub fn wizard_prev_field(&mut self) {
        let count = step_fields(self.wizard.current_step()).len();
        if count > 0 {
            self.wizard_focus = (self.wizard_focus + count - 1) % count;
        }
    }

    pub fn wizard_type(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            if let Some(text) = self.wizard.form_mut().text_mut(field) {
                text.push(c);
            }
        }
    }

    pub fn wizard_backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            if let Some(text) = self.wizard.form_mut().text_mut(field) {
                text.pop();
            }
        }
    }

    pub fn move_focus_area_cursor(&mut self, delta: isize) {
        let len = FOCUS_AREA_OPTIONS.len() as isize;
        self.focus_area_cursor = (self.focus_area_cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn toggle_focus_area(&mut self) {
        let area = FOCUS_AREA_OPTIONS[self.focus_area_cursor];
        self.wizard.form_mut().toggle_focus_area(area);
    }

    pub fn toggle_terms(&mut self) {
        let form = self.wizard.form_mut();
        form.agree_terms = !form.agree_terms;
    }

    pub fn wizard_advance(&mut self) {
        match self.wizard.advance() {
            Ok(summary) => {
                self.wizard_focus = 0;
                if summary.is_some() {
                    self.review_summary = summary;
                }
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn wizard_retreat(&mut self) {
        if self.wizard.retreat() {
            self.wizard_focus = 0;
        }
    }

    pub fn wizard_submit(&mut self) {
        let today = Utc::now().date_naive();
        let actor = self.session.as_ref().map(|user| user.name.as_str());
        let mut board = ApplicationReviewBoard::new(&mut self.data);

        match self.wizard.submit(&mut board, actor, today) {
            Ok(record) => {
                self.review_summary = None;
                self.wizard_focus = 0;
                self.persist();
                self.show_page(Page::Landing);
                self.notify(
                    NoticeKind::Success,
                    format!(
                        "Application {} submitted successfully! You will receive an email once your application is reviewed.",
                        record.id
                    ),
                );
            }
            Err(err) => self.report(&err),
        }
    }

    /// Leaves the wizard without discarding what was typed.
    pub fn leave_wizard(&mut self) {
        self.show_page(Page::Landing);
    }

    // ---- admin review -----------------------------------------------------

    fn queue(&self) -> ApplicationQueue<'_> {
        ApplicationQueue::new(&self.data)
    }

    pub fn metrics(&self) -> DashboardMetrics {
        self.queue().metrics()
    }

    pub fn visible_applications(&self) -> Vec<&ApplicationRecord> {
        self.queue().list(self.status_filter).collect()
    }

    pub fn selected_record(&self) -> Option<&ApplicationRecord> {
        self.visible_applications()
            .get(self.selected_application)
            .copied()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_applications().len();
        self.selected_application = self.selected_application.min(count.saturating_sub(1));
    }

    pub fn select_next_application(&mut self) {
        let count = self.visible_applications().len();
        if self.selected_application + 1 < count {
            self.selected_application += 1;
        }
    }

    pub fn select_prev_application(&mut self) {
        self.selected_application = self.selected_application.saturating_sub(1);
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.selected_application = 0;
    }

    pub fn open_selected_application(&mut self) {
        if let Some(id) = self.selected_record().map(|app| app.id.clone()) {
            self.detail_id = Some(id);
            self.mode = AppMode::ApplicationDetail;
        }
    }

    pub fn detail_record(&self) -> Option<&ApplicationRecord> {
        let id = self.detail_id.as_deref()?;
        self.queue().get_by_id(id).ok()
    }

    pub fn close_detail(&mut self) {
        self.detail_id = None;
        self.mode = AppMode::Normal;
    }

    /// Applies `status` to the application in the detail popup.
    pub fn set_detail_status(&mut self, status: ApplicationStatus) {
        let Some(id) = self.detail_id.clone() else {
            return;
        };
        let actor = self.session.as_ref().map(|user| user.name.as_str());
        let mut board = ApplicationReviewBoard::new(&mut self.data);

        match board.set_status(&id, status, actor) {
            Ok(_) => {
                self.persist();
                self.close_detail();
                self.clamp_selection();
                self.notify(NoticeKind::Success, format!("Application {} {} successfully!", id, status));
            }
            Err(err) => self.report(&err),
        }
    }

    /// Writes the filtered application table to a CSV file in the data
    /// directory.
    pub fn export_applications(&mut self) {
        let path = self.export_dir.join(format!("applications-{}.csv", self.status_filter));
        let view = self.queue().list(self.status_filter);
        let result = std::fs::create_dir_all(&self.export_dir)
            .map_err(csv::Error::from)
            .and_then(|_| ApplicationCsvExporter::export_to_path(view, &path));

        match result {
            Ok(count) => self.notify(
                NoticeKind::Success,
                format!("Exported {} applications to {}", count, path.display()),
            ),
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                self.notify(NoticeKind::Error, format!("Export failed: {}", err));
            }
        }
    }

    // ---- applicant status -------------------------------------------------

    /// The signed-in applicant's own application.
    pub fn my_application(&self) -> Option<&ApplicationRecord> {
        let id = self.session.as_ref()?.application_id.as_deref()?;
        self.queue().get_by_id(id).ok()
    }

    // ---- events and opportunities -----------------------------------------

    pub fn start_event_form(&mut self) {
        if self.session.as_ref().map(|user| user.role) != Some(Role::Admin) {
            self.notify(NoticeKind::Error, "Only administrators can create events");
            return;
        }
        self.event_draft = EventDraft::default();
        self.event_focus = 0;
        self.mode = AppMode::EventForm;
    }

    pub fn event_type(&mut self, c: char) {
        if let Some(text) = self.event_draft.field_mut(self.event_focus) {
            text.push(c);
        }
    }

    pub fn event_backspace(&mut self) {
        if let Some(text) = self.event_draft.field_mut(self.event_focus) {
            text.pop();
        }
    }

    pub fn event_next_field(&mut self) {
        self.event_focus = (self.event_focus + 1) % EventDraft::FIELDS.len();
    }

    pub fn event_prev_field(&mut self) {
        let len = EventDraft::FIELDS.len();
        self.event_focus = (self.event_focus + len - 1) % len;
    }

    pub fn cancel_event_form(&mut self) {
        self.event_draft = EventDraft::default();
        self.mode = AppMode::Normal;
    }

    pub fn save_event(&mut self) {
        let actor = self.session.as_ref().map(|user| user.name.as_str());
        match create_event(&mut self.data, &self.event_draft, actor) {
            Ok(event) => {
                let title = event.title.clone();
                let date = event.date;
                self.persist();
                self.cancel_event_form();
                self.calendar = CalendarCursor::containing(date);
                self.notify(NoticeKind::Success, format!("Event \"{}\" created successfully!", title));
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn shift_calendar(&mut self, delta: i32) {
        self.calendar.shift(delta);
    }

    pub fn cycle_opportunity_category(&mut self) {
        let categories = opportunity_categories(&self.data.opportunities);
        let current = categories
            .iter()
            .position(|c| *c == self.opportunity_category)
            .unwrap_or(0);
        self.opportunity_category = categories[(current + 1) % categories.len()].clone();
    }

    pub fn visible_opportunities(&self) -> Vec<&OpportunityRecord> {
        filter_opportunities(&self.data.opportunities, &self.opportunity_category).collect()
    }

    pub fn cycle_resource_category(&mut self) {
        let categories = resource_categories(&RESOURCE_LIBRARY);
        let current = categories
            .iter()
            .position(|c| *c == self.resource_category)
            .unwrap_or(0);
        self.resource_category = categories[(current + 1) % categories.len()];
    }

    pub fn visible_resources(&self) -> Vec<&'static ResourceEntry> {
        filter_resources(&RESOURCE_LIBRARY, self.resource_category).collect()
    }
}
