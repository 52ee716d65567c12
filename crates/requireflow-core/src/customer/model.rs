//! Customer domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::requirement::input::require_text;

/// A customer organization that raises requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub size: CustomerSize,
    pub stage: CustomerStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_value: Option<f64>,
    #[serde(default)]
    pub contacts: Vec<CustomerContact>,
    pub created_at: DateTime<Utc>,
}

/// A person at a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub id: String,
    pub name: String,
    pub title: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub influence: ContactInfluence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSize {
    Large,
    Medium,
    Small,
}

impl CustomerSize {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

/// Commercial relationship phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStage {
    Potential,
    Trial,
    Paid,
    Renewal,
}

impl CustomerStage {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Potential => "potential",
            Self::Trial => "trial",
            Self::Paid => "paid",
            Self::Renewal => "renewal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactInfluence {
    DecisionMaker,
    Influencer,
    User,
    Evaluator,
}

impl ContactInfluence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionMaker => "decision_maker",
            Self::Influencer => "influencer",
            Self::User => "user",
            Self::Evaluator => "evaluator",
        }
    }
}

/// Field set accepted by customer creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCustomer {
    pub name: String,
    pub industry: String,
    pub size: CustomerSize,
    pub stage: CustomerStage,
    #[serde(default)]
    pub contract_value: Option<f64>,
    #[serde(default)]
    pub contacts: Option<Vec<NewContact>>,
}

/// A contact supplied with a new customer. The id is assigned when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewContact {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub influence: ContactInfluence,
}

impl NewCustomer {
    pub fn validate(&self) -> CoreResult<()> {
        require_text("name", &self.name)?;
        if let Some(value) = self.contract_value {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::validation(format!(
                    "contractValue must be a non-negative amount, got {}",
                    value
                )));
            }
        }
        for contact in self.contacts.iter().flatten() {
            require_text("contacts[].name", &contact.name)?;
        }
        Ok(())
    }
}
