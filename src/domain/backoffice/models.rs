//! Payloads returned by the backoffice REST API
//!
//! Deserialization is lenient wherever the dashboard can still show something
//! useful: a missing message or contact value becomes `None` instead of
//! failing the whole response.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Number of flagged events within the 30-day window at which the backend
/// blocks a lead.
pub const BLOCK_THRESHOLD: u64 = 5;

/// Daily analytics shown on the overview tab (`/api/analytics/daily`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(deserialize_with = "de_count")]
    pub total_leads: u64,
    #[serde(deserialize_with = "de_count")]
    pub messages_today: u64,
    #[serde(default)]
    pub spam_percentage: f64,
    #[serde(deserialize_with = "de_count")]
    pub spam_users: u64,
    #[serde(default)]
    pub last_updated: String,
    /// Flagged events today; older backends omit it
    #[serde(
        default,
        deserialize_with = "de_opt_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub spam_today: Option<u64>,
}

/// A single lead with its contact methods and recent activity (`/api/lead/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDetail {
    pub lead: Lead,
    #[serde(default)]
    pub contact_methods: Vec<ContactMethod>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl LeadDetail {
    /// Value of the first contact method of the given type.
    ///
    /// Only the first method of a type is considered; an empty value on that
    /// method counts as absent.
    pub fn contact(&self, kind: &str) -> Option<&str> {
        self.contact_methods
            .iter()
            .find(|method| method.kind == kind)
            .and_then(|method| method.value.as_deref())
            .filter(|value| !value.is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.contact("phone")
    }

    pub fn email(&self) -> Option<&str> {
        self.contact("email")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMethod {
    /// Channel type, e.g. "phone" or "email"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub content: Option<ActivityContent>,
}

impl Activity {
    pub fn is_inbound(&self) -> bool {
        self.direction.as_deref() == Some("inbound")
    }

    pub fn lead_message(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|content| content.lead_message.as_deref())
            .filter(|text| !text.is_empty())
    }

    pub fn assistant_message(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|content| content.assistant_message.as_deref())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityContent {
    #[serde(rename = "leadMessage", default)]
    pub lead_message: Option<String>,
    #[serde(rename = "assistantMessage", default)]
    pub assistant_message: Option<String>,
}

/// One flagged interaction from the last 7 days (`/api/spam/activities`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub spam_date: String,
    #[serde(default)]
    pub lead_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub spam_reason: String,
    #[serde(default)]
    pub flagged_by: String,
}

/// Per-lead flagged-event aggregate over 30 days (`/api/spam/users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedSubject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub lead_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(deserialize_with = "de_count")]
    pub spam_count_30_days: u64,
    #[serde(default)]
    pub first_spam: Option<String>,
    #[serde(default)]
    pub last_spam: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
}

impl FlaggedSubject {
    /// Whether the count has reached the blocking threshold
    pub fn is_severe(&self) -> bool {
        self.spam_count_30_days >= BLOCK_THRESHOLD
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// The backend converts DynamoDB decimals to floats, so counts may arrive as
// `12.0` instead of `12`.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    count_from_f64(value).ok_or_else(|| de::Error::custom(format!("invalid count: {value}")))
}

fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) => count_from_f64(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid count: {value}"))),
        None => Ok(None),
    }
}

fn count_from_f64(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 {
        Some(value.round() as u64)
    } else {
        None
    }
}
