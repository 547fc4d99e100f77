//! Contract ↔ exposure file links

use crate::core::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Association between one contract and one exposure file
///
/// Links carry no payload of their own. Neither reference is guaranteed to
/// resolve unless the store runs with [`LinkIntegrity::Strict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractExposureLink {
    pub id: EntityId,
    pub contract_id: EntityId,
    pub exposure_file_id: EntityId,
}

impl ContractExposureLink {
    pub fn connects(&self, contract_id: EntityId, exposure_file_id: EntityId) -> bool {
        self.contract_id == contract_id && self.exposure_file_id == exposure_file_id
    }
}

/// Insert payload for a [`ContractExposureLink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub contract_id: EntityId,
    pub exposure_file_id: EntityId,
}

impl NewLink {
    pub fn new(contract_id: EntityId, exposure_file_id: EntityId) -> Self {
        Self {
            contract_id,
            exposure_file_id,
        }
    }

    pub fn into_link(self, id: EntityId) -> ContractExposureLink {
        ContractExposureLink {
            id,
            contract_id: self.contract_id,
            exposure_file_id: self.exposure_file_id,
        }
    }
}

/// How strictly `create_link` checks its input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkIntegrity {
    /// Accept any pair, including dangling ids and duplicates
    #[default]
    Permissive,

    /// Both ids must exist and the pair must not be linked yet
    Strict,
}
