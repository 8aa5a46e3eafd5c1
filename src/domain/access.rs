use std::fmt;

use super::directory::{Role, SessionUser};
use super::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Login,
    Apply,
    About,
    Opportunities,
    Events,
    Resources,
    Profile,
    MemberDashboard,
    AdminDashboard,
    ApplicationStatus,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Home",
            Page::Login => "Login",
            Page::Apply => "Apply",
            Page::About => "About",
            Page::Opportunities => "Opportunities",
            Page::Events => "Events",
            Page::Resources => "Resources",
            Page::Profile => "Profile",
            Page::MemberDashboard => "Member Dashboard",
            Page::AdminDashboard => "Admin Dashboard",
            Page::ApplicationStatus => "Application Status",
        }
    }

    fn is_public(&self) -> bool {
        matches!(
            self,
            Page::Landing | Page::Login | Page::Apply | Page::About | Page::Opportunities | Page::Events
        )
    }

    fn is_member_only(&self) -> bool {
        matches!(self, Page::MemberDashboard | Page::Resources | Page::Profile)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Whether `user` (or an anonymous visitor) may open `page`.
pub fn can_access(page: Page, user: Option<&SessionUser>) -> bool {
    if page.is_public() {
        return true;
    }
    let Some(user) = user else {
        return false;
    };
    if page == Page::AdminDashboard && user.role != Role::Admin {
        return false;
    }
    !(page.is_member_only() && user.role == Role::Applicant)
}

pub fn check_access(page: Page, user: Option<&SessionUser>) -> DomainResult<()> {
    if can_access(page, user) {
        Ok(())
    } else {
        Err(DomainError::AccessDenied(page))
    }
}

/// Page a user lands on right after signing in.
pub fn home_page(role: Role) -> Page {
    match role {
        Role::Admin => Page::AdminDashboard,
        Role::Member => Page::MemberDashboard,
        Role::Applicant => Page::ApplicationStatus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InMemoryDirectory;

    fn session(email: &str) -> SessionUser {
        use crate::domain::UserDirectory;
        InMemoryDirectory::demo().lookup(email).unwrap().session()
    }

    #[test]
    fn test_public_pages_open_to_visitors() {
        for page in [Page::Landing, Page::Login, Page::Apply, Page::About, Page::Opportunities, Page::Events] {
            assert!(can_access(page, None), "{page} should be public");
        }
        assert!(!can_access(Page::Resources, None));
        assert!(!can_access(Page::ApplicationStatus, None));
    }

    #[test]
    fn test_admin_dashboard_requires_admin() {
        assert!(can_access(Page::AdminDashboard, Some(&session("admin@yan.org"))));
        assert!(!can_access(Page::AdminDashboard, Some(&session("member@yan.org"))));
        assert_eq!(
            check_access(Page::AdminDashboard, None),
            Err(DomainError::AccessDenied(Page::AdminDashboard))
        );
    }

    #[test]
    fn test_applicants_kept_out_of_member_pages() {
        let applicant = session("applicant@yan.org");
        assert!(!can_access(Page::MemberDashboard, Some(&applicant)));
        assert!(!can_access(Page::Resources, Some(&applicant)));
        assert!(can_access(Page::ApplicationStatus, Some(&applicant)));
        assert!(can_access(Page::Resources, Some(&session("member@yan.org"))));
    }

    #[test]
    fn test_home_page_per_role() {
        assert_eq!(home_page(Role::Admin), Page::AdminDashboard);
        assert_eq!(home_page(Role::Member), Page::MemberDashboard);
        assert_eq!(home_page(Role::Applicant), Page::ApplicationStatus);
    }
}
