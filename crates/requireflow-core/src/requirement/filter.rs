//! Requirement list filtering.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::model::{
    Priority, ProductModule, Requirement, RequirementStatus, RequirementType, SourceCategory,
};
use crate::error::{CoreError, CoreResult};

/// Conjunction of optional clauses. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementFilter {
    pub status: Option<RequirementStatus>,
    pub priority: Option<Priority>,
    pub customer_id: Option<String>,
    pub module: Option<ProductModule>,
    #[serde(rename = "type")]
    pub kind: Option<RequirementType>,
    pub source_category: Option<SourceCategory>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl RequirementFilter {
    /// Whether `req` satisfies every clause present.
    pub fn matches(&self, req: &Requirement) -> bool {
        if self.status.is_some_and(|s| s != req.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != req.priority) {
            return false;
        }
        if self
            .customer_id
            .as_deref()
            .is_some_and(|id| id != req.customer_id)
        {
            return false;
        }
        if self.module.is_some_and(|m| m != req.module) {
            return false;
        }
        if self.kind.is_some_and(|k| k != req.kind) {
            return false;
        }
        if self
            .source_category
            .is_some_and(|c| c != req.source.category)
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !req.title.to_lowercase().contains(&needle)
                && !req.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Raw string-valued filter, as it arrives from a query string or CLI flags.
///
/// Blank values mean "no clause".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub customer_id: Option<String>,
    pub module: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub source_category: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<FilterParams> for RequirementFilter {
    type Error = CoreError;

    fn try_from(params: FilterParams) -> CoreResult<Self> {
        Ok(Self {
            status: parse_param("status", params.status)?,
            priority: parse_param("priority", params.priority)?,
            customer_id: non_blank(params.customer_id),
            module: parse_param("module", params.module)?,
            kind: parse_param("type", params.kind)?,
            source_category: parse_param("sourceCategory", params.source_category)?,
            search: non_blank(params.search),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse an enum from its wire string.
pub fn parse_param<T: DeserializeOwned>(field: &str, value: Option<String>) -> CoreResult<Option<T>> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.clone()))
            .map(Some)
            .map_err(|_| CoreError::validation(format!("Invalid {}: '{}'", field, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_params_mean_no_clause() {
        let params = FilterParams {
            status: Some(String::new()),
            search: Some(String::new()),
            ..Default::default()
        };
        let filter = RequirementFilter::try_from(params).unwrap();
        assert_eq!(filter, RequirementFilter::default());
    }

    #[test]
    fn test_params_parse_enums() {
        let params = FilterParams {
            status: Some("developing".to_string()),
            priority: Some("P1".to_string()),
            kind: Some("bug".to_string()),
            source_category: Some("backend".to_string()),
            ..Default::default()
        };
        let filter = RequirementFilter::try_from(params).unwrap();
        assert_eq!(filter.status, Some(RequirementStatus::Developing));
        assert_eq!(filter.priority, Some(Priority::P1));
        assert_eq!(filter.kind, Some(RequirementType::Bug));
        assert_eq!(filter.source_category, Some(SourceCategory::Backend));
    }

    #[test]
    fn test_invalid_param_is_validation_error() {
        let params = FilterParams {
            priority: Some("P9".to_string()),
            ..Default::default()
        };
        let err = RequirementFilter::try_from(params).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}
