//! Request bodies for the loadout operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What to do with a monster's held-item slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipAction {
    Give,
    Remove,
}

/// `POST /api/monsters/{monster_id}/held-item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipRequest {
    pub trainer_id: Uuid,
    pub action: EquipAction,
    /// Required for `give`, ignored for `remove`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

impl EquipRequest {
    pub fn give(trainer_id: Uuid, item_name: impl Into<String>) -> Self {
        Self {
            trainer_id,
            action: EquipAction::Give,
            item_name: Some(item_name.into()),
        }
    }

    pub fn remove(trainer_id: Uuid) -> Self {
        Self {
            trainer_id,
            action: EquipAction::Remove,
            item_name: None,
        }
    }
}

/// `POST /api/monsters/{monster_id}/ability-item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyAbilityItemRequest {
    pub trainer_id: Uuid,
    pub item_name: String,
    /// Only read for items that set a chosen ability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_ability: Option<String>,
}
