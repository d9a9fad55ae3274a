//! HTTP routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use menagerie_domain::{LoadoutError, MonsterId, TrainerId};
use menagerie_shared::{
    AbilitiesResponse, AbilityListResponse, AbilityView, ActionResponse, ApplyAbilityItemRequest,
    EquipAction, EquipRequest, ErrorKind, ErrorResponse,
};

use super::auth::Caller;
use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::abilities::{AbilityItemError, NO_DESCRIPTION};
use crate::use_cases::equipment::EquipmentError;
use crate::use_cases::OwnershipError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/abilities", get(list_abilities))
        .route("/api/monsters/{monster_id}/abilities", get(check_abilities))
        .route("/api/monsters/{monster_id}/held-item", post(change_held_item))
        .route(
            "/api/monsters/{monster_id}/ability-item",
            post(apply_ability_item),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Loadout
// =============================================================================

async fn change_held_item(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<EquipRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let monster_id = monster_id(path)?;
    let Json(request) = body.map_err(ApiError::from)?;
    let trainer_id = TrainerId::from_uuid(request.trainer_id);
    let equipment = &app.use_cases.equipment;

    let change = match request.action {
        EquipAction::Give => {
            let item_name = request
                .item_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ApiError::invalid_input("Item name is required"))?;
            equipment
                .give
                .execute(&caller, trainer_id, monster_id, item_name)
                .await?
        }
        EquipAction::Remove => {
            equipment
                .remove
                .execute(&caller, trainer_id, monster_id)
                .await?
        }
    };

    Ok(Json(ActionResponse::ok(change.message)))
}

async fn apply_ability_item(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ApplyAbilityItemRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let monster_id = monster_id(path)?;
    let Json(request) = body.map_err(ApiError::from)?;

    let change = app
        .use_cases
        .abilities
        .apply
        .execute(
            &caller,
            TrainerId::from_uuid(request.trainer_id),
            monster_id,
            &request.item_name,
            request.selected_ability.as_deref(),
        )
        .await?;

    Ok(Json(ActionResponse::ok(change.message)))
}

// =============================================================================
// Abilities
// =============================================================================

async fn check_abilities(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AbilitiesResponse>, ApiError> {
    let monster_id = monster_id(path)?;
    let report = app
        .use_cases
        .abilities
        .check
        .execute(&caller, monster_id)
        .await?;

    Ok(Json(AbilitiesResponse {
        success: true,
        ability: report.active.as_ref().map(|a| a.name.to_string()),
        ability1: report.known1.name.to_string(),
        ability2: report.known2.name.to_string(),
        ability_description: report
            .active
            .map(|a| a.description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        ability1_description: report.known1.description,
        ability2_description: report.known2.description,
    }))
}

async fn list_abilities(
    State(app): State<Arc<App>>,
    Caller(_caller): Caller,
) -> Json<AbilityListResponse> {
    let abilities = app
        .use_cases
        .abilities
        .list
        .execute()
        .into_iter()
        .map(|a| AbilityView {
            name: a.name.to_string(),
            effect: a.description,
        })
        .collect();
    Json(AbilityListResponse::new(abilities))
}

fn monster_id(path: Result<Path<Uuid>, PathRejection>) -> Result<MonsterId, ApiError> {
    path.map(|Path(id)| MonsterId::from_uuid(id))
        .map_err(|e| ApiError::invalid_input(format!("Invalid monster id: {}", e.body_text())))
}

// =============================================================================
// Errors
// =============================================================================

/// A failed request: one wire error kind plus a message for the player.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorKind::NotAuthenticated, "Not authenticated")
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::InvalidInput | ErrorKind::InsufficientInventory => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::CatalogExhausted | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::new(self.kind, self.message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::invalid_input(format!("Invalid request body: {}", e.body_text()))
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { entity_type, .. } => {
                ApiError::new(ErrorKind::NotFound, format!("{entity_type} not found"))
            }
            RepoError::Conflict { .. } => ApiError::new(
                ErrorKind::Conflict,
                "The record was changed by another request, please retry",
            ),
            other => {
                tracing::error!(error = %other, "Repository failure");
                ApiError::new(ErrorKind::Internal, "Internal server error")
            }
        }
    }
}

impl From<OwnershipError> for ApiError {
    fn from(e: OwnershipError) -> Self {
        match e {
            OwnershipError::NotFound(_) => ApiError::new(ErrorKind::NotFound, e.to_string()),
            OwnershipError::Forbidden(message) => ApiError::new(ErrorKind::Forbidden, message),
            OwnershipError::Repo(e) => e.into(),
        }
    }
}

impl From<LoadoutError> for ApiError {
    fn from(e: LoadoutError) -> Self {
        let kind = match &e {
            LoadoutError::InvalidInput(_) => ErrorKind::InvalidInput,
            LoadoutError::InsufficientInventory { .. } => ErrorKind::InsufficientInventory,
            LoadoutError::InvalidState(_) => ErrorKind::InvalidState,
            LoadoutError::CatalogExhausted { .. } => {
                return ApiError::new(ErrorKind::CatalogExhausted, "Failed to generate abilities")
            }
        };
        ApiError::new(kind, e.to_string())
    }
}

impl From<EquipmentError> for ApiError {
    fn from(e: EquipmentError) -> Self {
        match e {
            EquipmentError::Ownership(e) => e.into(),
            EquipmentError::Loadout(e) => e.into(),
            EquipmentError::Repo(e) => e.into(),
        }
    }
}

impl From<AbilityItemError> for ApiError {
    fn from(e: AbilityItemError) -> Self {
        match e {
            AbilityItemError::Ownership(e) => e.into(),
            AbilityItemError::Loadout(e) => e.into(),
            AbilityItemError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Repositories;
    use crate::infrastructure::clock::{FixedRandom, SystemClock};
    use crate::infrastructure::ports::{MonsterRepo, TrainerRepo};
    use crate::infrastructure::roster::SqliteRosterRepo;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use menagerie_domain::{
        AbilityCatalog, EffectCatalog, Inventories, Inventory, ItemCategory, Level, Monster,
        MonsterName, PlayerId, Stat, StatSpread, Trainer, TrainerName,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const PLAYER: &str = "1234567890";

    struct Harness {
        _dir: TempDir,
        roster: Arc<SqliteRosterRepo>,
        router: Router,
        trainer: Trainer,
        monster: Monster,
    }

    async fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menagerie.db");
        let roster = Arc::new(
            SqliteRosterRepo::new(path.to_str().unwrap(), Arc::new(SystemClock::new()))
                .await
                .unwrap(),
        );

        let trainer = Trainer::new(
            PlayerId::new(PLAYER).unwrap(),
            TrainerName::new("Ash").unwrap(),
        )
        .with_inventories(Inventories::new(
            Inventory::new().with("Ability Capsule", 1),
            Inventory::new().with("Tempo Band", 1),
        ));
        let mut ev = [0u16; 6];
        ev[5] = 100;
        let monster = Monster::new(
            trainer.id(),
            MonsterName::new("Sproutle").unwrap(),
            Level::new(40).unwrap(),
            StatSpread::new([0; 6], ev).unwrap(),
        );
        roster.insert_trainer(&trainer).await.unwrap();
        roster.insert_monster(&monster).await.unwrap();

        let app = App::with_ports(
            Repositories {
                monster: roster.clone(),
                trainer: roster.clone(),
                loadout: roster.clone(),
            },
            Arc::new(EffectCatalog::builtin().unwrap()),
            Arc::new(AbilityCatalog::builtin().unwrap()),
            Arc::new(FixedRandom(0)),
        );

        Harness {
            _dir: dir,
            roster,
            router: routes().with_state(Arc::new(app)),
            trainer,
            monster,
        }
    }

    fn post(uri: String, user: Option<&str>, body: Value) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: String, user: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, request: HttpRequest<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let h = harness().await;

        let response = h
            .router
            .clone()
            .oneshot(get("/api/health".into(), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn give_held_item_applies_and_persists() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "give", "itemName": "Tempo Band" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        let monster = MonsterRepo::get(&*h.roster, h.monster.id()).await.unwrap().unwrap();
        assert_eq!(monster.stats().ev(Stat::Atk), 50);
        assert_eq!(monster.stats().ev(Stat::Spa), 50);
        let trainer = TrainerRepo::get(&*h.roster, h.trainer.id()).await.unwrap().unwrap();
        assert_eq!(trainer.inventory(ItemCategory::HeldItems).count("Tempo Band"), 0);
    }

    #[tokio::test]
    async fn give_then_remove_restores_stats_and_bag() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let give = json!({ "trainerId": h.trainer.id(), "action": "give", "itemName": "Tempo Band" });
        let remove = json!({ "trainerId": h.trainer.id(), "action": "remove" });

        let (status, _) = send(&h.router, post(uri.clone(), Some(PLAYER), give)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&h.router, post(uri, Some(PLAYER), remove)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("Tempo Band"));

        let monster = MonsterRepo::get(&*h.roster, h.monster.id()).await.unwrap().unwrap();
        assert_eq!(monster.stats(), h.monster.stats());
        assert!(monster.held_item().is_none());
        let trainer = TrainerRepo::get(&*h.roster, h.trainer.id()).await.unwrap().unwrap();
        assert_eq!(trainer.inventory(ItemCategory::HeldItems).count("Tempo Band"), 1);
    }

    #[tokio::test]
    async fn missing_user_header_is_not_authenticated() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "remove" });

        let (status, body) = send(&h.router, post(uri, None, body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("not_authenticated"));
    }

    #[tokio::test]
    async fn other_player_is_forbidden() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "give", "itemName": "Tempo Band" });

        let (status, body) = send(&h.router, post(uri, Some("someone-else"), body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], json!("forbidden"));
    }

    #[tokio::test]
    async fn unknown_monster_is_not_found() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", MonsterId::new());
        let body = json!({ "trainerId": h.trainer.id(), "action": "remove" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("not_found"));
        assert_eq!(body["message"], json!("Monster not found"));
    }

    #[tokio::test]
    async fn item_not_in_bag_is_insufficient_inventory() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "give", "itemName": "Muscle Band" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("insufficient_inventory"));
        assert_eq!(body["message"], json!("Trainer does not have Muscle Band"));
    }

    #[tokio::test]
    async fn remove_with_nothing_held_is_invalid_state() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "remove" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], json!("invalid_state"));
    }

    #[tokio::test]
    async fn give_without_item_name_is_invalid_input() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "action": "give" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("invalid_input"));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_input() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/held-item", h.monster.id());
        let body = json!({ "trainerId": "not-a-uuid", "action": "give" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("invalid_input"));
    }

    #[tokio::test]
    async fn capsule_on_fresh_monster_draws_abilities_then_flips() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/ability-item", h.monster.id());
        let body = json!({ "trainerId": h.trainer.id(), "itemName": "Ability Capsule" });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            json!("Changed Sproutle's ability from Adaptability to Blaze")
        );
        let trainer = TrainerRepo::get(&*h.roster, h.trainer.id()).await.unwrap().unwrap();
        assert_eq!(trainer.inventory(ItemCategory::Items).count("Ability Capsule"), 0);
    }

    #[tokio::test]
    async fn scroll_missing_from_bag_fails_before_selection_check() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/ability-item", h.monster.id());
        let body = json!({
            "trainerId": h.trainer.id(),
            "itemName": "Scroll of Secrets",
            "selectedAbility": "Levitation",
        });

        let (status, body) = send(&h.router, post(uri, Some(PLAYER), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("insufficient_inventory"));
    }

    #[tokio::test]
    async fn check_abilities_draws_and_describes() {
        let h = harness().await;
        let uri = format!("/api/monsters/{}/abilities", h.monster.id());

        let (status, body) = send(&h.router, get(uri.clone(), Some(PLAYER))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ability"], json!("Adaptability"));
        assert_eq!(body["ability1"], json!("Adaptability"));
        assert_eq!(body["ability2"], json!("Blaze"));
        assert_eq!(
            body["ability2Description"],
            json!("Powers up Fire-type moves when HP is low.")
        );

        // Persisted: a second read sees the same pair.
        let (_, again) = send(&h.router, get(uri, Some(PLAYER))).await;
        assert_eq!(again["ability2"], json!("Blaze"));
    }

    #[tokio::test]
    async fn list_abilities_is_sorted() {
        let h = harness().await;

        let (status, body) = send(&h.router, get("/api/abilities".into(), Some(PLAYER))).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["abilities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Adaptability"));
    }

    #[test]
    fn every_error_kind_has_one_status() {
        for kind in ErrorKind::ALL {
            let status = ApiError::new(kind, "x").status();
            assert!(status.is_client_error() || status.is_server_error());
        }
        assert_eq!(
            ApiError::new(ErrorKind::CatalogExhausted, "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
