//! Report HTTP handlers

use crate::core::analytics::{
    DEFAULT_GROSS_UP_FACTOR, GrossUpCalculator, GrossUpOverride, TreatyComparison, TreatyReport,
    YearlyRate, default_yearly_rates, gross_up_factor, parse_amount,
};
use crate::core::entity::EntityId;
use crate::core::error::TreatyResult;
use crate::core::query::CompareQuery;
use crate::core::service::LinkStore;
use crate::core::validation::validators::{validate_decimal, validate_non_negative};
use crate::core::validation::{Sanitize, Validated, parse_entity_id};
use crate::entities::contract::fetch_contract;
use crate::links::linked_exposure_files;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct ReportAppState {
    pub store: Arc<dyn LinkStore>,
}

/// Contract plus its resolved exposure files and totals
pub async fn build_report(
    store: &dyn LinkStore,
    contract_id: EntityId,
) -> TreatyResult<TreatyReport> {
    let contract = fetch_contract(store, contract_id).await?;
    let files = linked_exposure_files(store, contract_id).await?;
    Ok(TreatyReport::build(contract, files)?)
}

/// GET /contracts/{id}/report
pub async fn get_treaty_report(
    State(state): State<ReportAppState>,
    Path(id): Path<String>,
) -> TreatyResult<Json<TreatyReport>> {
    let contract_id = parse_entity_id(&id)?;
    build_report(state.store.as_ref(), contract_id)
        .await
        .map(Json)
}

/// GET /reports/compare?left={id}&right={id}
pub async fn compare_treaties(
    State(state): State<ReportAppState>,
    Query(query): Query<CompareQuery>,
) -> TreatyResult<Json<TreatyComparison>> {
    let (left, right) = query.ids()?;
    let left = build_report(state.store.as_ref(), left).await?;
    let right = build_report(state.store.as_ref(), right).await?;
    tracing::debug!(
        left = left.contract.id,
        right = right.contract.id,
        "comparing treaties"
    );
    Ok(Json(TreatyComparison::between(left, right)))
}

/// Body of `POST /analytics/gross-up-factor`
///
/// Omitted rates mean the empty default table. `previous` is the factor
/// currently shown, kept when no row is complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct GrossUpRequest {
    pub rates: Option<Vec<YearlyRate>>,
    #[validate(
        custom(function = "validate_decimal"),
        custom(function = "validate_non_negative")
    )]
    pub previous: Option<String>,
    #[validate(nested)]
    #[serde(rename = "override")]
    pub manual_override: Option<GrossUpOverride>,
}

impl Sanitize for GrossUpRequest {
    fn sanitize(&mut self) {
        if let Some(rates) = &mut self.rates {
            for row in rates.iter_mut() {
                row.rate = row.rate.trim().to_string();
                row.exposure_gwp = row.exposure_gwp.trim().to_string();
                row.egpi = row.egpi.trim().to_string();
            }
        }
        if let Some(previous) = &mut self.previous {
            *previous = previous.trim().to_string();
        }
        if let Some(manual) = &mut self.manual_override {
            manual.value = manual.value.trim().to_string();
            manual.comment = manual.comment.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrossUpResponse {
    pub rates: Vec<YearlyRate>,
    /// Number of rows that took part in the mean
    pub complete_rows: usize,
    /// Result of this calculation, `null` when no row was complete
    pub calculated: Option<f64>,
    /// Factor after applying the keep-previous rule
    pub factor: f64,
    /// What the dashboard should display: the override if any, else `factor`
    pub effective_factor: f64,
    pub overridden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_comment: Option<String>,
}

/// POST /analytics/gross-up-factor
pub async fn calculate_gross_up(
    Validated(request): Validated<GrossUpRequest>,
) -> TreatyResult<Json<GrossUpResponse>> {
    let rates = request.rates.unwrap_or_else(default_yearly_rates);
    let previous = request
        .previous
        .as_deref()
        .map(parse_amount)
        .unwrap_or(DEFAULT_GROSS_UP_FACTOR);

    let mut calculator = GrossUpCalculator::new(previous);
    let factor = calculator.recalculate(&rates);
    let calculated = gross_up_factor(&rates);

    let (effective_factor, override_comment) = match request.manual_override {
        Some(manual) => (parse_amount(&manual.value), Some(manual.comment)),
        None => (factor, None),
    };

    Ok(Json(GrossUpResponse {
        complete_rows: rates.iter().filter(|r| r.is_complete()).count(),
        rates,
        calculated,
        factor,
        effective_factor,
        overridden: override_comment.is_some(),
        override_comment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::GrossUpOverride;

    #[tokio::test]
    async fn test_gross_up_defaults_keep_initial_value() {
        let Json(response) = calculate_gross_up(Validated(GrossUpRequest::default()))
            .await
            .unwrap();
        assert_eq!(response.rates.len(), 5);
        assert_eq!(response.complete_rows, 0);
        assert_eq!(response.calculated, None);
        assert_eq!(response.factor, 1.2);
        assert_eq!(response.effective_factor, 1.2);
        assert!(!response.overridden);
    }

    #[tokio::test]
    async fn test_gross_up_override_wins() {
        let request = GrossUpRequest {
            rates: Some(vec![YearlyRate::new("2026", "2", "1", "1")]),
            previous: None,
            manual_override: Some(GrossUpOverride {
                value: "1.45".to_string(),
                comment: "Broker feedback".to_string(),
            }),
        };
        let Json(response) = calculate_gross_up(Validated(request)).await.unwrap();
        assert_eq!(response.factor, 2.0);
        assert_eq!(response.effective_factor, 1.45);
        assert_eq!(response.override_comment.as_deref(), Some("Broker feedback"));
    }

    #[test]
    fn test_previous_factor_must_be_a_decimal() {
        for previous in ["abc", "", "-1.1"] {
            let request = GrossUpRequest {
                previous: Some(previous.to_string()),
                ..Default::default()
            };
            assert!(request.validate().is_err(), "{:?} should be rejected", previous);
        }

        let request = GrossUpRequest {
            previous: Some("1.35".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[tokio::test]
    async fn test_previous_factor_is_kept_without_complete_rows() {
        let request = GrossUpRequest {
            previous: Some("1.35".to_string()),
            ..Default::default()
        };
        let Json(response) = calculate_gross_up(Validated(request)).await.unwrap();
        assert_eq!(response.factor, 1.35);
    }

    #[test]
    fn test_nested_override_is_validated() {
        let request = GrossUpRequest {
            manual_override: Some(GrossUpOverride {
                value: "abc".to_string(),
                comment: String::new(),
            }),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
