//! SQLite-backed monster and trainer storage.
//!
//! Inventories are stored as JSON text blobs (`{"Tempo Band": 2}`) and are
//! only ever parsed or serialized here. A `NULL` or empty blob is an empty
//! inventory; anything else that fails to parse is a hard error.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use menagerie_domain::{
    AbilityName, AbilitySet, HeldItemSlot, Inventories, Inventory, ItemCategory, Level, Monster,
    MonsterId, MonsterName, PlayerId, Stat, StatDelta, StatField, StatSpread, Trainer, TrainerId,
    TrainerName,
};

use crate::infrastructure::ports::{ClockPort, LoadoutStore, MonsterRepo, RepoError, TrainerRepo};

/// SQLite implementation of the monster, trainer and loadout ports.
pub struct SqliteRosterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteRosterRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("roster", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trainers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                player_user_id TEXT NOT NULL,
                inv_items TEXT,
                inv_helditems TEXT,
                version INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("roster", e))?;

        let stat_columns: String = stat_columns()
            .map(|column| format!("{column} INTEGER NOT NULL DEFAULT 0,\n"))
            .collect();
        let monsters = format!(
            r#"
            CREATE TABLE IF NOT EXISTS monsters (
                id TEXT PRIMARY KEY,
                trainer_id TEXT NOT NULL REFERENCES trainers(id),
                name TEXT NOT NULL,
                level INTEGER NOT NULL,
                held_item TEXT,
                held_item_applied TEXT,
                ability TEXT,
                ability1 TEXT,
                ability2 TEXT,
                {stat_columns}
                version INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )
            "#
        );
        sqlx::query(&monsters)
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("roster", e))?;

        Ok(Self { pool, clock })
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    pub async fn insert_trainer(&self, trainer: &Trainer) -> Result<(), RepoError> {
        let (items, held_items) = encode_inventories(trainer.inventories())?;

        sqlx::query(
            r#"
            INSERT INTO trainers (id, name, player_user_id, inv_items, inv_helditems, version, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(trainer.id().to_string())
        .bind(trainer.name().to_string())
        .bind(trainer.player_id().as_str())
        .bind(items)
        .bind(held_items)
        .bind(trainer.version())
        .bind(self.clock.now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_trainer", e))?;

        Ok(())
    }

    pub async fn insert_monster(&self, monster: &Monster) -> Result<(), RepoError> {
        let columns: Vec<String> = stat_columns().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            r#"
            INSERT INTO monsters (
                id, trainer_id, name, level, held_item, held_item_applied,
                ability, ability1, ability2, {}, version, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, {}, ?, ?)
            "#,
            columns.join(", "),
            placeholders,
        );
        let loadout = LoadoutColumns::encode(monster)?;

        let mut q = sqlx::query(&sql)
            .bind(monster.id().to_string())
            .bind(monster.trainer_id().to_string())
            .bind(monster.name().to_string())
            .bind(i64::from(monster.level().value()))
            .bind(loadout.held_item)
            .bind(loadout.held_item_applied)
            .bind(loadout.ability)
            .bind(loadout.ability1)
            .bind(loadout.ability2);
        for field in stat_fields() {
            q = q.bind(i64::from(monster.stats().get(field)));
        }
        q.bind(monster.version())
            .bind(self.clock.now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("insert_monster", e))?;

        Ok(())
    }

    /// Overwrite a trainer's raw inventory blobs. Used to load records
    /// written by other tools.
    pub async fn write_raw_inventories(
        &self,
        id: TrainerId,
        items: Option<&str>,
        held_items: Option<&str>,
    ) -> Result<(), RepoError> {
        sqlx::query("UPDATE trainers SET inv_items = ?, inv_helditems = ? WHERE id = ?")
            .bind(items)
            .bind(held_items)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("write_raw_inventories", e))?;
        Ok(())
    }
}

#[async_trait]
impl MonsterRepo for SqliteRosterRepo {
    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError> {
        let row = sqlx::query("SELECT * FROM monsters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_monster", e))?;

        row.as_ref().map(decode_monster).transpose()
    }

    async fn save_abilities(&self, monster: &Monster) -> Result<Monster, RepoError> {
        let loadout = LoadoutColumns::encode(monster)?;

        let result = sqlx::query(
            r#"
            UPDATE monsters
            SET ability = ?, ability1 = ?, ability2 = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(loadout.ability)
        .bind(loadout.ability1)
        .bind(loadout.ability2)
        .bind(self.clock.now().to_rfc3339())
        .bind(monster.id().to_string())
        .bind(monster.version())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_abilities", e))?;

        if result.rows_affected() == 0 {
            tracing::warn!(monster_id = %monster.id(), version = monster.version(), "Stale monster version on ability save");
            return Err(RepoError::conflict("Monster", monster.id()));
        }

        Ok(monster.clone().with_version(monster.version() + 1))
    }
}

#[async_trait]
impl TrainerRepo for SqliteRosterRepo {
    async fn get(&self, id: TrainerId) -> Result<Option<Trainer>, RepoError> {
        let row = sqlx::query("SELECT * FROM trainers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_trainer", e))?;

        row.as_ref().map(decode_trainer).transpose()
    }
}

#[async_trait]
impl LoadoutStore for SqliteRosterRepo {
    async fn commit(&self, monster: &Monster, trainer: &Trainer) -> Result<(), RepoError> {
        let now = self.clock.now().to_rfc3339();
        let loadout = LoadoutColumns::encode(monster)?;
        let (items, held_items) = encode_inventories(trainer.inventories())?;

        let assignments: Vec<String> = stat_columns().map(|c| format!("{c} = ?")).collect();
        let monster_sql = format!(
            r#"
            UPDATE monsters
            SET held_item = ?, held_item_applied = ?, ability = ?, ability1 = ?, ability2 = ?,
                {}, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
            assignments.join(", "),
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("commit", e))?;

        let mut q = sqlx::query(&monster_sql)
            .bind(loadout.held_item)
            .bind(loadout.held_item_applied)
            .bind(loadout.ability)
            .bind(loadout.ability1)
            .bind(loadout.ability2);
        for field in stat_fields() {
            q = q.bind(i64::from(monster.stats().get(field)));
        }
        let updated = q
            .bind(&now)
            .bind(monster.id().to_string())
            .bind(monster.version())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("commit", e))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepoError::database("commit", e))?;
            tracing::warn!(monster_id = %monster.id(), version = monster.version(), "Stale monster version on commit");
            return Err(RepoError::conflict("Monster", monster.id()));
        }

        let updated = sqlx::query(
            r#"
            UPDATE trainers
            SET inv_items = ?, inv_helditems = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(items)
        .bind(held_items)
        .bind(&now)
        .bind(trainer.id().to_string())
        .bind(trainer.version())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("commit", e))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepoError::database("commit", e))?;
            tracing::warn!(trainer_id = %trainer.id(), version = trainer.version(), "Stale trainer version on commit");
            return Err(RepoError::conflict("Trainer", trainer.id()));
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))?;
        Ok(())
    }
}

// =============================================================================
// Row mapping
// =============================================================================

fn stat_fields() -> impl Iterator<Item = StatField> {
    Stat::ALL
        .into_iter()
        .flat_map(|stat| [StatField::iv(stat), StatField::ev(stat)])
}

fn stat_columns() -> impl Iterator<Item = String> {
    stat_fields().map(|field| field.column())
}

/// Nullable loadout columns of a monster row.
struct LoadoutColumns {
    held_item: Option<String>,
    held_item_applied: Option<String>,
    ability: Option<String>,
    ability1: Option<String>,
    ability2: Option<String>,
}

impl LoadoutColumns {
    fn encode(monster: &Monster) -> Result<Self, RepoError> {
        let held_item_applied = monster
            .held_item()
            .and_then(HeldItemSlot::applied)
            .map(serde_json::to_string)
            .transpose()
            .map_err(RepoError::serialization)?;
        let abilities = monster.abilities();

        Ok(Self {
            held_item: monster.held_item().map(|slot| slot.name().to_string()),
            held_item_applied,
            ability: abilities.and_then(AbilitySet::active).map(ToString::to_string),
            ability1: abilities.map(|set| set.known1().to_string()),
            ability2: abilities.map(|set| set.known2().to_string()),
        })
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
}

fn decode_monster(row: &SqliteRow) -> Result<Monster, RepoError> {
    let id: String = column(row, "id")?;
    let trainer_id: String = column(row, "trainer_id")?;
    let name: String = column(row, "name")?;
    let level: i64 = column(row, "level")?;
    let version: i64 = column(row, "version")?;

    let id: MonsterId = id.parse().map_err(RepoError::serialization)?;
    let trainer_id: TrainerId = trainer_id.parse().map_err(RepoError::serialization)?;
    let name = MonsterName::new(name).map_err(RepoError::serialization)?;
    let level = u8::try_from(level)
        .map_err(RepoError::serialization)
        .and_then(|l| Level::new(l).map_err(RepoError::serialization))?;

    let mut iv = [0u16; 6];
    let mut ev = [0u16; 6];
    for (i, stat) in Stat::ALL.into_iter().enumerate() {
        iv[i] = stat_value(row, StatField::iv(stat))?;
        ev[i] = stat_value(row, StatField::ev(stat))?;
    }
    let stats = StatSpread::new(iv, ev).map_err(RepoError::serialization)?;

    Ok(Monster::new(trainer_id, name, level, stats)
        .with_id(id)
        .with_held_item(decode_held_item(row)?)
        .with_abilities(decode_abilities(row)?)
        .with_version(version))
}

fn stat_value(row: &SqliteRow, field: StatField) -> Result<u16, RepoError> {
    let raw: i64 = column(row, &field.column())?;
    u16::try_from(raw).map_err(|_| RepoError::serialization(format!("{field} out of range: {raw}")))
}

fn decode_held_item(row: &SqliteRow) -> Result<Option<HeldItemSlot>, RepoError> {
    let name: Option<String> = column(row, "held_item")?;
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return Ok(None);
    };
    let applied: Option<String> = column(row, "held_item_applied")?;

    match applied.filter(|a| !a.trim().is_empty()) {
        Some(json) => {
            let delta: StatDelta =
                serde_json::from_str(&json).map_err(RepoError::serialization)?;
            Ok(Some(HeldItemSlot::new(name, delta)))
        }
        None => Ok(Some(HeldItemSlot::legacy(name))),
    }
}

fn decode_abilities(row: &SqliteRow) -> Result<Option<AbilitySet>, RepoError> {
    let ability: Option<String> = column(row, "ability")?;
    let ability1: Option<String> = column(row, "ability1")?;
    let ability2: Option<String> = column(row, "ability2")?;

    let parse = |raw: String| AbilityName::new(raw).map_err(RepoError::serialization);
    match (ability1, ability2) {
        (None, None) if ability.is_none() => Ok(None),
        (Some(known1), Some(known2)) => Ok(Some(AbilitySet::from_parts(
            ability.map(parse).transpose()?,
            parse(known1)?,
            parse(known2)?,
        ))),
        _ => Err(RepoError::serialization(
            "incomplete ability triple: both known abilities are required",
        )),
    }
}

fn decode_trainer(row: &SqliteRow) -> Result<Trainer, RepoError> {
    let id: String = column(row, "id")?;
    let name: String = column(row, "name")?;
    let player: String = column(row, "player_user_id")?;
    let items: Option<String> = column(row, "inv_items")?;
    let held_items: Option<String> = column(row, "inv_helditems")?;
    let version: i64 = column(row, "version")?;

    let id: TrainerId = id.parse().map_err(RepoError::serialization)?;
    let name = TrainerName::new(name).map_err(RepoError::serialization)?;
    let player = PlayerId::new(player).map_err(RepoError::serialization)?;
    let inventories = Inventories::new(
        decode_inventory(items.as_deref(), ItemCategory::Items)?,
        decode_inventory(held_items.as_deref(), ItemCategory::HeldItems)?,
    );

    Ok(Trainer::new(player, name)
        .with_id(id)
        .with_inventories(inventories)
        .with_version(version))
}

/// Parse one inventory blob. Counts must be non-negative integers.
fn decode_inventory(blob: Option<&str>, category: ItemCategory) -> Result<Inventory, RepoError> {
    match blob.map(str::trim) {
        None | Some("") => Ok(Inventory::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| RepoError::serialization(format!("{} inventory: {e}", category.as_str()))),
    }
}

fn encode_inventories(inventories: &Inventories) -> Result<(String, String), RepoError> {
    let items = serde_json::to_string(inventories.category(ItemCategory::Items))
        .map_err(RepoError::serialization)?;
    let held_items = serde_json::to_string(inventories.category(ItemCategory::HeldItems))
        .map_err(RepoError::serialization)?;
    Ok((items, held_items))
}
