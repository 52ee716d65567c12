//! Requirement domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::AiAssessment;

/// A customer-raised feature request or issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source: RequirementSource,

    /// Snapshot of the customer at creation time; never re-synced.
    pub customer_id: String,
    pub customer_name: String,
    pub customer_industry: String,

    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub module: ProductModule,
    #[serde(default)]
    pub tags: Vec<String>,

    pub priority: Priority,
    pub customer_urgency: CustomerUrgency,
    pub business_value: u8,
    pub frequency: u32,

    pub status: RequirementStatus,
    #[serde(default)]
    pub linked_requirements: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_assessment: Option<AiAssessment>,
}

impl Requirement {
    /// Refresh `updated_at`. The new value is always later than the old one.
    pub fn touch(&mut self) {
        self.updated_at = later_than(self.updated_at);
    }

    /// When the requirement counts as completed: `released_at`, else `updated_at`.
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.released_at.unwrap_or(self.updated_at)
    }

    /// Whether a status counts as work in progress.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self.status,
            RequirementStatus::Planned | RequirementStatus::Developing | RequirementStatus::Testing
        )
    }
}

/// The current time, or one microsecond past `prev` if the clock has not moved.
pub(crate) fn later_than(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}

/// Where and how a requirement was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequirementSource {
    #[serde(rename = "type")]
    pub kind: SourceType,
    pub category: SourceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_recording: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    pub collector_id: String,
    pub collector_name: String,
    pub collect_time: String,
}

/// A discussion entry on a requirement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Requirement lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    #[default]
    PendingReview,
    Planned,
    Developing,
    Testing,
    Released,
    Rejected,
    Merged,
}

impl RequirementStatus {
    pub const ALL: [Self; 7] = [
        Self::PendingReview,
        Self::Planned,
        Self::Developing,
        Self::Testing,
        Self::Released,
        Self::Rejected,
        Self::Merged,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Planned => "planned",
            Self::Developing => "developing",
            Self::Testing => "testing",
            Self::Released => "released",
            Self::Rejected => "rejected",
            Self::Merged => "merged",
        }
    }
}

/// Urgency rank, `P0` most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::P0, Self::P1, Self::P2, Self::P3];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

/// How urgent the customer considers the request. Independent of [`Priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerUrgency {
    Urgent,
    Important,
    Normal,
    Low,
}

impl CustomerUrgency {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Important => "important",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

/// Request category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    NewFeature,
    Enhancement,
    Experience,
    Performance,
    Bug,
    Integration,
    Security,
    Documentation,
}

impl RequirementType {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewFeature => "new_feature",
            Self::Enhancement => "enhancement",
            Self::Experience => "experience",
            Self::Performance => "performance",
            Self::Bug => "bug",
            Self::Integration => "integration",
            Self::Security => "security",
            Self::Documentation => "documentation",
        }
    }
}

/// Product area a requirement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductModule {
    QaEngine,
    Semantic,
    Dashboard,
    Metric,
    Permission,
    System,
    Report,
    Mobile,
    Integration,
    Other,
}

impl ProductModule {
    pub const ALL: [Self; 10] = [
        Self::QaEngine,
        Self::Semantic,
        Self::Dashboard,
        Self::Metric,
        Self::Permission,
        Self::System,
        Self::Report,
        Self::Mobile,
        Self::Integration,
        Self::Other,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QaEngine => "qa_engine",
            Self::Semantic => "semantic",
            Self::Dashboard => "dashboard",
            Self::Metric => "metric",
            Self::Permission => "permission",
            Self::System => "system",
            Self::Report => "report",
            Self::Mobile => "mobile",
            Self::Integration => "integration",
            Self::Other => "other",
        }
    }
}

/// Channel through which a requirement was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    MeetingPresale,
    MeetingRequirement,
    MeetingReview,
    ChatWechat,
    ChatDingtalk,
    ChatFeishu,
    Email,
    Ticket,
    VisitBusiness,
    VisitDinner,
    Implementation,
    BackendQa,
    BackendBehavior,
    BackendFeedback,
}

impl SourceType {
    pub const ALL: [Self; 14] = [
        Self::MeetingPresale,
        Self::MeetingRequirement,
        Self::MeetingReview,
        Self::ChatWechat,
        Self::ChatDingtalk,
        Self::ChatFeishu,
        Self::Email,
        Self::Ticket,
        Self::VisitBusiness,
        Self::VisitDinner,
        Self::Implementation,
        Self::BackendQa,
        Self::BackendBehavior,
        Self::BackendFeedback,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeetingPresale => "meeting_presale",
            Self::MeetingRequirement => "meeting_requirement",
            Self::MeetingReview => "meeting_review",
            Self::ChatWechat => "chat_wechat",
            Self::ChatDingtalk => "chat_dingtalk",
            Self::ChatFeishu => "chat_feishu",
            Self::Email => "email",
            Self::Ticket => "ticket",
            Self::VisitBusiness => "visit_business",
            Self::VisitDinner => "visit_dinner",
            Self::Implementation => "implementation",
            Self::BackendQa => "backend_qa",
            Self::BackendBehavior => "backend_behavior",
            Self::BackendFeedback => "backend_feedback",
        }
    }

    /// The category this channel naturally belongs to.
    pub fn default_category(&self) -> SourceCategory {
        match self {
            Self::MeetingPresale
            | Self::MeetingRequirement
            | Self::MeetingReview
            | Self::ChatWechat
            | Self::ChatDingtalk
            | Self::ChatFeishu
            | Self::Email
            | Self::Ticket => SourceCategory::Online,
            Self::VisitBusiness | Self::VisitDinner | Self::Implementation => {
                SourceCategory::Offline
            }
            Self::BackendQa | Self::BackendBehavior | Self::BackendFeedback => {
                SourceCategory::Backend
            }
        }
    }
}

/// Broad grouping of source channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Online,
    Offline,
    Backend,
}

impl SourceCategory {
    pub const ALL: [Self; 3] = [Self::Online, Self::Offline, Self::Backend];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Backend => "backend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&RequirementStatus::PendingReview).unwrap(),
            "\"pending_review\""
        );
        assert_eq!(serde_json::to_string(&Priority::P0).unwrap(), "\"P0\"");
        assert_eq!(
            serde_json::to_string(&ProductModule::QaEngine).unwrap(),
            "\"qa_engine\""
        );
        assert_eq!(
            serde_json::from_str::<SourceType>("\"backend_qa\"").unwrap(),
            SourceType::BackendQa
        );
        for status in RequirementStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_priority_orders_by_urgency() {
        assert!(Priority::P0 < Priority::P1);
        assert!(Priority::P2 < Priority::P3);
    }

    #[test]
    fn test_later_than_is_strictly_increasing() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(later_than(future) > future);

        let past = Utc::now() - Duration::seconds(60);
        assert!(later_than(past) > past);
    }

    #[test]
    fn test_source_category_of_channel() {
        assert_eq!(SourceType::ChatFeishu.default_category(), SourceCategory::Online);
        assert_eq!(SourceType::VisitDinner.default_category(), SourceCategory::Offline);
        assert_eq!(SourceType::BackendFeedback.default_category(), SourceCategory::Backend);
    }

    #[test]
    fn test_source_type_as_str_matches_wire_name() {
        for kind in SourceType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(serde_json::from_str::<SourceType>(&json).unwrap(), kind);
        }
    }
}
