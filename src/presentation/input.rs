use crate::application::{App, AppMode};
use crate::domain::{ApplicationStatus, FieldId, Page};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key),
            AppMode::Login => Self::handle_login_mode(app, key),
            AppMode::Wizard => Self::handle_wizard_mode(app, key, modifiers),
            AppMode::EventForm => Self::handle_event_form_mode(app, key),
            AppMode::ApplicationDetail => Self::handle_detail_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('1') => app.show_page(Page::Landing),
            KeyCode::Char('2') => app.show_page(Page::Apply),
            KeyCode::Char('3') => app.show_page(Page::Opportunities),
            KeyCode::Char('4') => app.show_page(Page::Events),
            KeyCode::Char('5') => app.show_page(Page::About),
            KeyCode::Char('6') => app.show_page(Page::Resources),
            KeyCode::Char('7') => app.show_page(Page::Profile),
            KeyCode::Char('d') => app.show_dashboard(),
            KeyCode::Char('l') => {
                if app.session.is_some() {
                    app.logout();
                } else {
                    app.show_page(Page::Login);
                }
            }
            _ => Self::handle_page_key(app, key),
        }
    }

    fn handle_page_key(app: &mut App, key: KeyCode) {
        match app.page {
            Page::AdminDashboard => match key {
                KeyCode::Up | KeyCode::Char('k') => app.select_prev_application(),
                KeyCode::Down | KeyCode::Char('j') => app.select_next_application(),
                KeyCode::Char('f') => app.cycle_status_filter(),
                KeyCode::Enter => app.open_selected_application(),
                KeyCode::Char('x') => app.export_applications(),
                _ => {}
            },
            Page::Opportunities => {
                if key == KeyCode::Char('c') {
                    app.cycle_opportunity_category();
                }
            }
            Page::Resources => {
                if key == KeyCode::Char('c') {
                    app.cycle_resource_category();
                }
            }
            Page::Events => match key {
                KeyCode::Left | KeyCode::Char('[') => app.shift_calendar(-1),
                KeyCode::Right | KeyCode::Char(']') => app.shift_calendar(1),
                KeyCode::Char('n') => app.start_event_form(),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_login_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.show_page(Page::Landing),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.login_toggle_field(),
            KeyCode::Enter => app.submit_login(),
            KeyCode::Backspace => app.login_backspace(),
            KeyCode::Char(c) => app.login_type(c),
            _ => {}
        }
    }

    fn handle_wizard_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => return app.leave_wizard(),
            KeyCode::PageUp => return app.wizard_retreat(),
            KeyCode::PageDown => return app.wizard_advance(),
            KeyCode::Char('b') if modifiers.contains(KeyModifiers::CONTROL) => {
                return app.wizard_retreat();
            }
            _ => {}
        }

        if app.wizard.is_final_step() {
            match key {
                KeyCode::Char(' ') | KeyCode::Char('t') => app.toggle_terms(),
                KeyCode::Enter => app.wizard_submit(),
                _ => {}
            }
            return;
        }

        let on_focus_areas = app.focused_field() == Some(FieldId::FocusAreas);
        match key {
            KeyCode::Tab | KeyCode::Down => app.wizard_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.wizard_prev_field(),
            KeyCode::Enter => app.wizard_advance(),
            KeyCode::Left if on_focus_areas => app.move_focus_area_cursor(-1),
            KeyCode::Right if on_focus_areas => app.move_focus_area_cursor(1),
            KeyCode::Char(' ') if on_focus_areas => app.toggle_focus_area(),
            KeyCode::Backspace => app.wizard_backspace(),
            KeyCode::Char(c) => app.wizard_type(c),
            _ => {}
        }
    }

    fn handle_event_form_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.cancel_event_form(),
            KeyCode::Tab | KeyCode::Down => app.event_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.event_prev_field(),
            KeyCode::Enter => app.save_event(),
            KeyCode::Backspace => app.event_backspace(),
            KeyCode::Char(c) => app.event_type(c),
            _ => {}
        }
    }

    fn handle_detail_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
            KeyCode::Char('a') => app.set_detail_status(ApplicationStatus::Accepted),
            KeyCode::Char('r') => app.set_detail_status(ApplicationStatus::Rejected),
            KeyCode::Char('u') => app.set_detail_status(ApplicationStatus::UnderReview),
            KeyCode::Char('p') => app.set_detail_status(ApplicationStatus::Pending),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusFilter;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn sign_in_admin(app: &mut App) {
        press(app, KeyCode::Char('l'));
        assert_eq!(app.mode, AppMode::Login);
        type_text(app, "admin@yan.org");
        press(app, KeyCode::Tab);
        type_text(app, "admin123");
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_login_via_keys() {
        let mut app = App::default();
        sign_in_admin(&mut app);
        assert_eq!(app.page, Page::AdminDashboard);
        assert_eq!(app.mode, AppMode::Normal);

        press(&mut app, KeyCode::Char('l'));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_wizard_typing_goes_to_focused_field() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.mode, AppMode::Wizard);

        type_text(&mut app, "Alicq");
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "e");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Kim");

        assert_eq!(app.wizard.form().first_name, "Alice");
        assert_eq!(app.wizard.form().last_name, "Kim");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.page, Page::Landing);
        assert_eq!(app.wizard.form().first_name, "Alice");
    }

    #[test]
    fn test_focus_area_checklist_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('2'));
        for value in ["A", "B", "a@b.c", "1", "RW", "20"] {
            type_text(&mut app, value);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.current_step(), 2);

        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_field(), Some(FieldId::FocusAreas));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.wizard.form().focus_areas, vec!["Gender".to_string()]);

        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.wizard.current_step(), 1);
    }

    #[test]
    fn test_admin_review_keys() {
        let mut app = App::default();
        sign_in_admin(&mut app);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.status_filter, StatusFilter::Only(ApplicationStatus::Pending));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::ApplicationDetail);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.data.applications[0].status, ApplicationStatus::Rejected);
        assert!(app.visible_applications().is_empty());
    }

    #[test]
    fn test_calendar_navigation_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('4'));
        let start = app.calendar;
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Left);
        let mut expected = start;
        expected.shift(1);
        assert_eq!(app.calendar, expected);
    }

    #[test]
    fn test_resource_filter_key_for_members() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('l'));
        type_text(&mut app, "member@yan.org");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "member123");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.page, Page::Resources);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.resource_category, "guides");
    }

    #[test]
    fn test_page_keys_ignored_on_other_pages() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.status_filter, StatusFilter::All);
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.page, Page::Landing);
    }
}
