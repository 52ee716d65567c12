//! Caller-supplied payloads for creating and changing requirements.
//!
//! Every payload rejects unknown fields, so server-assigned fields (`id`,
//! `comments`, `createdAt`, `updatedAt`) cannot be smuggled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::assessment::AiAssessment;
use super::model::{
    CustomerUrgency, Priority, ProductModule, Requirement, RequirementSource, RequirementStatus,
    RequirementType,
};
use crate::error::{CoreError, CoreResult};

/// Field set accepted by requirement creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewRequirement {
    pub title: String,
    pub description: String,
    pub source: RequirementSource,
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
    #[serde(default)]
    pub status: Option<RequirementStatus>,
    #[serde(default)]
    pub linked_requirements: Vec<String>,
    #[serde(default)]
    pub planned_version: Option<String>,
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ai_assessment: Option<AiAssessment>,
}

impl NewRequirement {
    /// Check the constraints the type system cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        validate_business_value(self.business_value)?;
        if let Some(assessment) = &self.ai_assessment {
            assessment.validate()?;
        }
        Ok(())
    }

    /// Build the stored record. `created_at` and `updated_at` are both `now`.
    pub(crate) fn into_requirement(self, id: String, now: DateTime<Utc>) -> Requirement {
        Requirement {
            id,
            title: self.title,
            description: self.description,
            source: self.source,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_industry: self.customer_industry,
            kind: self.kind,
            module: self.module,
            tags: self.tags,
            priority: self.priority,
            customer_urgency: self.customer_urgency,
            business_value: self.business_value,
            frequency: self.frequency,
            status: self.status.unwrap_or_default(),
            linked_requirements: self.linked_requirements,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
            planned_version: self.planned_version,
            released_at: self.released_at,
            ai_assessment: self.ai_assessment,
        }
    }
}

/// Shallow patch: every present field replaces the stored value wholesale.
///
/// Optional record fields use `Option<Option<_>>` so that an explicit `null`
/// clears them while an absent key leaves them alone. Every other field
/// rejects `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequirementPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub source: Option<RequirementSource>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_industry: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "non_null")]
    pub kind: Option<RequirementType>,
    #[serde(default, deserialize_with = "non_null")]
    pub module: Option<ProductModule>,
    #[serde(default, deserialize_with = "non_null")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_urgency: Option<CustomerUrgency>,
    #[serde(default, deserialize_with = "non_null")]
    pub business_value: Option<u8>,
    #[serde(default, deserialize_with = "non_null")]
    pub frequency: Option<u32>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<RequirementStatus>,
    #[serde(default, deserialize_with = "non_null")]
    pub linked_requirements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub planned_version: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub released_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    pub ai_assessment: Option<Option<AiAssessment>>,
}

impl RequirementPatch {
    /// Check the constraints of every field present in the patch.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(value) = self.business_value {
            validate_business_value(value)?;
        }
        if let Some(Some(assessment)) = &self.ai_assessment {
            assessment.validate()?;
        }
        Ok(())
    }

    /// Overwrite every present field on `req`. Does not touch `updated_at`.
    pub fn apply(self, req: &mut Requirement) {
        if let Some(v) = self.title {
            req.title = v;
        }
        if let Some(v) = self.description {
            req.description = v;
        }
        if let Some(v) = self.source {
            req.source = v;
        }
        if let Some(v) = self.customer_id {
            req.customer_id = v;
        }
        if let Some(v) = self.customer_name {
            req.customer_name = v;
        }
        if let Some(v) = self.customer_industry {
            req.customer_industry = v;
        }
        if let Some(v) = self.kind {
            req.kind = v;
        }
        if let Some(v) = self.module {
            req.module = v;
        }
        if let Some(v) = self.tags {
            req.tags = v;
        }
        if let Some(v) = self.priority {
            req.priority = v;
        }
        if let Some(v) = self.customer_urgency {
            req.customer_urgency = v;
        }
        if let Some(v) = self.business_value {
            req.business_value = v;
        }
        if let Some(v) = self.frequency {
            req.frequency = v;
        }
        if let Some(v) = self.status {
            req.status = v;
        }
        if let Some(v) = self.linked_requirements {
            req.linked_requirements = v;
        }
        if let Some(v) = self.planned_version {
            req.planned_version = v;
        }
        if let Some(v) = self.released_at {
            req.released_at = v;
        }
        if let Some(v) = self.ai_assessment {
            req.ai_assessment = v;
        }
    }
}

/// Field set accepted when appending a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewComment {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> CoreResult<()> {
        require_text("content", &self.content)
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?.map(Some).ok_or_else(|| {
        serde::de::Error::custom(
            "null is only allowed for plannedVersion, releasedAt and aiAssessment",
        )
    })
}

pub(crate) fn require_text(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_business_value(value: u8) -> CoreResult<()> {
    if !(1..=10).contains(&value) {
        return Err(CoreError::validation(format!(
            "businessValue must be 1-10, got {}",
            value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_rejects_unknown_and_server_fields() {
        for body in [
            json!({ "status": "planned", "colour": "red" }),
            json!({ "id": "other" }),
            json!({ "createdAt": "2024-01-01T00:00:00Z" }),
            json!({ "comments": [] }),
        ] {
            assert!(serde_json::from_value::<RequirementPatch>(body).is_err());
        }
    }

    #[test]
    fn test_patch_null_clears_optional_field() {
        let patch: RequirementPatch =
            serde_json::from_value(json!({ "plannedVersion": null })).unwrap();
        assert_eq!(patch.planned_version, Some(None));

        let patch: RequirementPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(patch.planned_version, None);
    }

    #[test]
    fn test_patch_rejects_null_on_required_fields() {
        for body in [
            json!({ "title": null }),
            json!({ "status": null }),
            json!({ "priority": null }),
            json!({ "type": null }),
            json!({ "source": null }),
            json!({ "tags": null }),
        ] {
            let err = serde_json::from_value::<RequirementPatch>(body).unwrap_err();
            assert!(err.to_string().contains("null is only allowed"));
        }

        let patch: RequirementPatch =
            serde_json::from_value(json!({ "title": "新标题", "releasedAt": null })).unwrap();
        assert_eq!(patch.title.as_deref(), Some("新标题"));
        assert_eq!(patch.released_at, Some(None));
    }

    #[test]
    fn test_patch_validation() {
        let patch: RequirementPatch =
            serde_json::from_value(json!({ "businessValue": 11 })).unwrap();
        assert!(patch.validate().is_err());

        let patch: RequirementPatch = serde_json::from_value(json!({ "title": "  " })).unwrap();
        assert!(patch.validate().is_err());

        let patch: RequirementPatch =
            serde_json::from_value(json!({ "status": "released", "businessValue": 10 })).unwrap();
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let body = json!({ "status": "shipped" });
        assert!(serde_json::from_value::<RequirementPatch>(body).is_err());
    }

    #[test]
    fn test_comment_requires_content() {
        let comment: NewComment = serde_json::from_value(json!({
            "userId": "1",
            "userName": "张三",
            "content": ""
        }))
        .unwrap();
        assert!(comment.validate().is_err());
    }
}
