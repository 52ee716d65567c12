//! Advisory prioritization scores attached to requirements.
//!
//! Assessments are supplied by callers (usually through an import). The store
//! keeps them verbatim and never computes one.

use serde::{Deserialize, Serialize};

use super::model::Priority;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAssessment {
    /// 0-100
    pub overall_score: u8,
    pub score_dimensions: ScoreDimensions,
    pub priority: Priority,
    pub suggested_schedule: String,
    pub expected_impact: String,
    /// Percentage, 0-100
    pub confidence_level: u8,
    pub analysis_basis: AnalysisBasis,
    pub assessed_at: String,
}

/// Sub-scores, each 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDimensions {
    pub user_value: u8,
    pub business_value: u8,
    pub implementation_cost: u8,
    pub strategic_alignment: u8,
    pub urgency: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBasis {
    #[serde(default)]
    pub related_goals: Vec<String>,
    #[serde(default)]
    pub historical_references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_data: Option<Vec<String>>,
}

impl AiAssessment {
    /// Check score ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if self.overall_score > 100 {
            return Err(CoreError::validation(format!(
                "aiAssessment.overallScore must be 0-100, got {}",
                self.overall_score
            )));
        }
        if self.confidence_level > 100 {
            return Err(CoreError::validation(format!(
                "aiAssessment.confidenceLevel must be 0-100, got {}",
                self.confidence_level
            )));
        }

        let d = &self.score_dimensions;
        let dimensions = [
            ("userValue", d.user_value),
            ("businessValue", d.business_value),
            ("implementationCost", d.implementation_cost),
            ("strategicAlignment", d.strategic_alignment),
            ("urgency", d.urgency),
        ];
        for (name, score) in dimensions {
            if !(1..=10).contains(&score) {
                return Err(CoreError::validation(format!(
                    "aiAssessment.scoreDimensions.{} must be 1-10, got {}",
                    name, score
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> AiAssessment {
        serde_json::from_value(serde_json::json!({
            "overallScore": 75,
            "scoreDimensions": {
                "userValue": 8,
                "businessValue": 9,
                "implementationCost": 7,
                "strategicAlignment": 8,
                "urgency": 7
            },
            "priority": "P1",
            "suggestedSchedule": "下一迭代",
            "expectedImpact": "提升用户查询效率",
            "confidenceLevel": 80,
            "analysisBasis": {
                "relatedGoals": ["提升用户体验"],
                "historicalReferences": [],
                "dataPoints": ["出现频次15次"]
            },
            "assessedAt": "2024-12-29T09:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_assessment() {
        let a = assessment();
        assert!(a.validate().is_ok());
        assert_eq!(a.analysis_basis.external_data, None);
    }

    #[test]
    fn test_dimension_out_of_range() {
        let mut a = assessment();
        a.score_dimensions.urgency = 0;
        let err = a.validate().unwrap_err();
        assert!(err.to_string().contains("urgency"));
    }

    #[test]
    fn test_overall_score_out_of_range() {
        let mut a = assessment();
        a.overall_score = 101;
        assert!(a.validate().is_err());
    }
}
