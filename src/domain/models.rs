use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::audit::AuditLog;
use super::errors::DomainError;

/// Review status of a membership application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Headline shown to the applicant on the status page.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending Review",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Not Accepted",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => {
                "Your application is currently pending review. We will notify you once it has been reviewed."
            }
            ApplicationStatus::UnderReview => {
                "Your application is currently being reviewed by our team. This process typically takes 5-7 business days."
            }
            ApplicationStatus::Accepted => {
                "Congratulations! Your application has been accepted. You are now a member of YAN."
            }
            ApplicationStatus::Rejected => {
                "We regret to inform you that your application was not accepted at this time. You may reapply after 6 months."
            }
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

/// Status restriction applied when listing applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Cycles all -> pending -> under_review -> accepted -> rejected -> all.
    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(ApplicationStatus::Pending),
            StatusFilter::Only(ApplicationStatus::Pending) => {
                StatusFilter::Only(ApplicationStatus::UnderReview)
            }
            StatusFilter::Only(ApplicationStatus::UnderReview) => {
                StatusFilter::Only(ApplicationStatus::Accepted)
            }
            StatusFilter::Only(ApplicationStatus::Accepted) => {
                StatusFilter::Only(ApplicationStatus::Rejected)
            }
            StatusFilter::Only(ApplicationStatus::Rejected) => StatusFilter::All,
        }
    }
}

impl From<ApplicationStatus> for StatusFilter {
    fn from(status: ApplicationStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    #[serde(deserialize_with = "lenient_age::deserialize")]
    pub age: u32,
    pub org_name: String,
    pub org_type: String,
    pub position: String,
    #[serde(default)]
    pub org_website: String,
    pub focus_areas: Vec<String>,
    pub motivation: String,
    pub experience: String,
    pub contribution: String,
    pub status: ApplicationStatus,
    pub submitted_date: NaiveDate,
    pub agree_terms: bool,
}

impl ApplicationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub location: String,
}

/// Everything persisted under the platform data key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformData {
    pub applications: Vec<ApplicationRecord>,
    pub events: Vec<EventRecord>,
    pub opportunities: Vec<OpportunityRecord>,
    pub audit_log: AuditLog,
}

/// Builds `PREFIX###` identifiers from a one-based sequence number.
pub(crate) fn sequence_id(prefix: &str, sequence: usize) -> String {
    format!("{}{:03}", prefix, sequence)
}

/// Ages written by the web form are stored as the raw input string.
mod lenient_age {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(u32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawAge::deserialize(deserializer)? {
            RawAge::Number(age) => Ok(age),
            RawAge::Text(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
