//! Sample records installed into empty collections on first start.

use chrono::{NaiveDate, NaiveTime};

use super::models::{ApplicationRecord, ApplicationStatus, EventRecord, OpportunityRecord, PlatformData};

/// Seeds every empty collection with sample records. Returns `true` if
/// anything was added.
pub fn seed_sample_data(data: &mut PlatformData) -> bool {
    let mut seeded = false;

    if data.applications.is_empty() {
        data.applications = sample_applications();
        seeded = true;
    }
    if data.events.is_empty() {
        data.events = sample_events();
        seeded = true;
    }
    if data.opportunities.is_empty() {
        data.opportunities = sample_opportunities();
        seeded = true;
    }

    if seeded {
        tracing::info!("seeded sample platform data");
    }
    seeded
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_applications() -> Vec<ApplicationRecord> {
    vec![
        ApplicationRecord {
            id: "APP001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Johnson".to_string(),
            email: "alice@example.com".to_string(),
            phone: "+250788123456".to_string(),
            country: "Rwanda".to_string(),
            age: 24,
            org_name: "Youth Empowerment Initiative".to_string(),
            org_type: "NGO".to_string(),
            position: "Programs Director".to_string(),
            org_website: "https://yei.org".to_string(),
            focus_areas: strings(&["Education", "Gender"]),
            motivation: "I want to join YAN to expand my network and learn from other youth advocates...".to_string(),
            experience: "I have 3 years of experience working on youth empowerment programs...".to_string(),
            contribution: "I can contribute training expertise and project management skills...".to_string(),
            status: ApplicationStatus::Pending,
            submitted_date: date(2026, 1, 15),
            agree_terms: true,
        },
        ApplicationRecord {
            id: "APP002".to_string(),
            first_name: "David".to_string(),
            last_name: "Kamau".to_string(),
            email: "david@example.com".to_string(),
            phone: "+254712345678".to_string(),
            country: "Kenya".to_string(),
            age: 27,
            org_name: "Climate Action Youth".to_string(),
            org_type: "Youth Group".to_string(),
            position: "Founder".to_string(),
            org_website: String::new(),
            focus_areas: strings(&["Environment", "Advocacy"]),
            motivation: "Environmental advocacy is my passion and YAN can help amplify our voice...".to_string(),
            experience: "Led multiple climate action campaigns in my community...".to_string(),
            contribution: "Environmental expertise and grassroots mobilization skills...".to_string(),
            status: ApplicationStatus::UnderReview,
            submitted_date: date(2026, 1, 20),
            agree_terms: true,
        },
        ApplicationRecord {
            id: "APP003".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Nkunda".to_string(),
            email: "sarah@example.com".to_string(),
            phone: "+250789654321".to_string(),
            country: "Rwanda".to_string(),
            age: 22,
            org_name: "Digital Skills Academy".to_string(),
            org_type: "Social Enterprise".to_string(),
            position: "Co-founder".to_string(),
            org_website: "https://dsa.rw".to_string(),
            focus_areas: strings(&["Digital", "Economic"]),
            motivation: "To connect with other tech-focused youth advocates...".to_string(),
            experience: "Built a successful social enterprise teaching digital skills...".to_string(),
            contribution: "Digital literacy training and tech solutions...".to_string(),
            status: ApplicationStatus::Accepted,
            submitted_date: date(2026, 1, 10),
            agree_terms: true,
        },
    ]
}

fn sample_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: "EVT001".to_string(),
            title: "Youth Leadership Summit 2026".to_string(),
            date: date(2026, 2, 15),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            location: "Kigali, Rwanda".to_string(),
            description: "Annual summit bringing together youth advocates from across Africa".to_string(),
        },
        EventRecord {
            id: "EVT002".to_string(),
            title: "Advocacy Workshop Series".to_string(),
            date: date(2026, 2, 20),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            location: "Virtual".to_string(),
            description: "Interactive workshop on effective advocacy strategies".to_string(),
        },
    ]
}

fn sample_opportunities() -> Vec<OpportunityRecord> {
    vec![
        OpportunityRecord {
            id: "OPP001".to_string(),
            title: "Youth Innovation Fund 2026".to_string(),
            category: "funding".to_string(),
            description: "Grants up to $10,000 for innovative youth-led projects".to_string(),
            deadline: date(2026, 3, 15),
            amount: Some("$10,000".to_string()),
            kind: None,
            location: "Pan-African".to_string(),
        },
        OpportunityRecord {
            id: "OPP002".to_string(),
            title: "Advanced Leadership Academy".to_string(),
            category: "training".to_string(),
            description: "Intensive 6-week leadership training program".to_string(),
            deadline: date(2026, 2, 20),
            amount: None,
            kind: Some("Certificate Program".to_string()),
            location: "Virtual + In-person".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fills_empty_collections() {
        let mut data = PlatformData::default();
        assert!(seed_sample_data(&mut data));
        assert_eq!(data.applications.len(), 3);
        assert_eq!(data.events.len(), 2);
        assert_eq!(data.opportunities.len(), 2);
        assert!(data.audit_log.is_empty());
    }

    #[test]
    fn test_seed_leaves_existing_collections_alone() {
        let mut data = PlatformData::default();
        seed_sample_data(&mut data);
        data.applications.truncate(1);
        assert!(!seed_sample_data(&mut data));
        assert_eq!(data.applications.len(), 1);
    }
}
