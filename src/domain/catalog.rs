//! Events, opportunities and member resources published on the platform.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::audit::AuditAction;
use super::errors::{DomainError, DomainResult};
use super::models::{sequence_id, EventRecord, OpportunityRecord, PlatformData};

/// Number of items shown in landing-page previews.
pub const PREVIEW_LEN: usize = 3;

/// Raw event form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl EventDraft {
    pub const FIELDS: [&'static str; 5] = ["Title", "Date", "Time", "Location", "Description"];

    pub fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.title),
            1 => Some(&mut self.date),
            2 => Some(&mut self.time),
            3 => Some(&mut self.location),
            4 => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.title,
            1 => &self.date,
            2 => &self.time,
            3 => &self.location,
            4 => &self.description,
            _ => "",
        }
    }
}

/// Validates `draft`, appends it as `EVT###` and records the audit entry.
pub fn create_event<'a>(
    data: &'a mut PlatformData,
    draft: &EventDraft,
    actor: Option<&str>,
) -> DomainResult<&'a EventRecord> {
    let mut invalid = Vec::new();
    for (index, name) in EventDraft::FIELDS.iter().enumerate() {
        if draft.field(index).trim().is_empty() {
            invalid.push(*name);
        }
    }

    let date = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d").ok();
    let time = NaiveTime::parse_from_str(draft.time.trim(), "%H:%M").ok();
    if date.is_none() && !invalid.contains(&"Date") {
        invalid.push("Date");
    }
    if time.is_none() && !invalid.contains(&"Time") {
        invalid.push("Time");
    }

    let (Some(date), Some(time), true) = (date, time, invalid.is_empty()) else {
        return Err(DomainError::IncompleteEvent(invalid));
    };

    let event = EventRecord {
        id: sequence_id("EVT", data.events.len() + 1),
        title: draft.title.trim().to_string(),
        date,
        time,
        location: draft.location.trim().to_string(),
        description: draft.description.trim().to_string(),
    };
    tracing::info!(id = %event.id, "event created");
    data.audit_log.append(
        AuditAction::EventCreated,
        format!("New event created: {}", event.title),
        actor,
    );
    data.events.push(event);
    Ok(&data.events[data.events.len() - 1])
}

/// Opportunities in `category`, or all of them for `"all"`.
pub fn filter_opportunities<'a>(
    opportunities: &'a [OpportunityRecord],
    category: &'a str,
) -> impl Iterator<Item = &'a OpportunityRecord> + Clone {
    opportunities
        .iter()
        .filter(move |opp| category == "all" || opp.category == category)
}

/// Distinct categories in first-seen order, prefixed with `"all"`.
pub fn opportunity_categories(opportunities: &[OpportunityRecord]) -> Vec<String> {
    let mut categories = vec!["all".to_string()];
    for opp in opportunities {
        if !categories.contains(&opp.category) {
            categories.push(opp.category.clone());
        }
    }
    categories
}

/// A member resource listed on the resources page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEntry {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

pub static RESOURCE_LIBRARY: [ResourceEntry; 6] = [
    ResourceEntry {
        title: "Advocacy Campaign Toolkit",
        category: "toolkits",
        description: "Planning, messaging and stakeholder mapping for youth-led campaigns",
    },
    ResourceEntry {
        title: "Digital Organizing Toolkit",
        category: "toolkits",
        description: "Running safe and effective online campaigns",
    },
    ResourceEntry {
        title: "Grant Writing Guide",
        category: "guides",
        description: "Step-by-step guide to writing competitive funding proposals",
    },
    ResourceEntry {
        title: "Monitoring and Evaluation Guide",
        category: "guides",
        description: "Measuring the outcomes of community programmes",
    },
    ResourceEntry {
        title: "African Youth Charter Brief",
        category: "policy",
        description: "Summary of commitments member states made to young people",
    },
    ResourceEntry {
        title: "Project Proposal Template",
        category: "templates",
        description: "Editable template with budget and logframe sections",
    },
];

/// Resources in `category`, or all of them for `"all"`.
pub fn filter_resources<'a>(
    resources: &'a [ResourceEntry],
    category: &'a str,
) -> impl Iterator<Item = &'a ResourceEntry> + Clone {
    resources
        .iter()
        .filter(move |resource| category == "all" || resource.category == category)
}

/// Distinct resource categories in first-seen order, prefixed with `"all"`.
pub fn resource_categories(resources: &[ResourceEntry]) -> Vec<&'static str> {
    let mut categories = vec!["all"];
    for resource in resources {
        if !categories.contains(&resource.category) {
            categories.push(resource.category);
        }
    }
    categories
}

pub fn preview<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(PREVIEW_LEN)]
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Month currently shown by the events calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl CalendarCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves by `delta` months, wrapping across years.
    pub fn shift(&mut self, delta: i32) {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        self.year = index.div_euclid(12);
        self.month = index.rem_euclid(12) as u32 + 1;
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        let mut next = *self;
        next.shift(1);
        match (self.first_day(), next.first_day()) {
            (Some(start), Some(end)) => (end - start).num_days() as u32,
            _ => 0,
        }
    }

    /// Days of this month on which at least one event takes place.
    pub fn event_days(&self, events: &[EventRecord]) -> BTreeSet<u32> {
        events
            .iter()
            .filter(|e| e.date.year() == self.year && e.date.month() == self.month)
            .map(|e| e.date.day())
            .collect()
    }
}
