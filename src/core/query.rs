//! Query-string parameters

use crate::core::entity::{Contract, EntityId};
use crate::core::error::{TreatyResult, ValidationError};
use crate::core::validation::parse_entity_id;
use serde::Deserialize;

/// `GET /contracts?search=term`
///
/// Matches contracts whose name or contract number contains the term,
/// ignoring case. A missing or blank term matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContractQuery {
    pub search: Option<String>,
}

impl ContractQuery {
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn apply(&self, contracts: Vec<Contract>) -> Vec<Contract> {
        match self.term() {
            Some(term) => contracts
                .into_iter()
                .filter(|c| matches_term(c, &term))
                .collect(),
            None => contracts,
        }
    }
}

fn matches_term(contract: &Contract, term: &str) -> bool {
    contract.name.to_lowercase().contains(term)
        || contract.contract_number.to_lowercase().contains(term)
}

/// `GET /reports/compare?left=1&right=2`
///
/// Both fields stay raw so a missing or malformed id maps to our own error
/// body instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareQuery {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl CompareQuery {
    pub fn ids(&self) -> TreatyResult<(EntityId, EntityId)> {
        Ok((required(&self.left, "left")?, required(&self.right, "right")?))
    }
}

fn required(raw: &Option<String>, argument: &str) -> TreatyResult<EntityId> {
    match raw.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => parse_entity_id(value),
        _ => Err(ValidationError::MissingArgument {
            argument: argument.to_string(),
        }
        .into()),
    }
}
