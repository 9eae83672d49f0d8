use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {kind}: {reason}")]
    Invalid {
        kind: &'static str,
        reason: &'static str,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Thread-safe SQLite store over the four record kinds.
///
/// Soft deletion only: `is_deleted` starts NULL, a delete sets it to 1, and
/// every read query filters on `is_deleted IS NULL`. Nothing is ever
/// physically removed.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Create a new store with the given database path
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store for testing
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS item (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                is_selected INTEGER,
                category_id TEXT,
                activity_json TEXT,
                is_deleted INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS item_category (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                is_deleted INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS item_order (
                id TEXT PRIMARY KEY,
                item_id TEXT NOT NULL,
                order_index REAL NOT NULL,
                is_deleted INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (item_id) REFERENCES item(id)
            );

            CREATE TABLE IF NOT EXISTS activity_log (
                id TEXT PRIMARY KEY,
                item_id TEXT NOT NULL,
                activity_type TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                score REAL NOT NULL,
                is_deleted INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (item_id) REFERENCES item(id)
            );

            CREATE INDEX IF NOT EXISTS idx_item_category_id ON item(category_id);
            CREATE INDEX IF NOT EXISTS idx_item_order_item_id ON item_order(item_id);
            CREATE INDEX IF NOT EXISTS idx_activity_log_item_id ON activity_log(item_id);
            CREATE INDEX IF NOT EXISTS idx_activity_log_timestamp ON activity_log(timestamp);
            "#,
        )?;
        Ok(())
    }

    // ==================== Category Operations ====================

    pub fn insert_category(&self, category: &mut ItemCategory) -> StoreResult<()> {
        if !short_string_ok(&category.name) {
            return Err(StoreError::Invalid {
                kind: "itemCategory",
                reason: "name must be non-empty and at most 50 characters",
            });
        }

        let conn = self.conn.lock().unwrap();
        category.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        category.created_at = now;
        category.updated_at = now;

        conn.execute(
            r#"INSERT INTO item_category (id, name, is_deleted, created_at, updated_at)
               VALUES (?1, ?2, NULL, ?3, ?4)"#,
            params![
                &category.id,
                &category.name,
                category.created_at.to_rfc3339(),
                category.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn set_category_deleted(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE item_category SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(format!("ItemCategory {}", id)));
        }
        Ok(())
    }

    // ==================== Item Operations ====================

    pub fn insert_item(&self, item: &mut Item) -> StoreResult<()> {
        if item.title.is_empty() {
            return Err(StoreError::Invalid {
                kind: "item",
                reason: "title must be non-empty",
            });
        }
        if let Some(ref activity) = item.activity_json {
            if !activity.is_valid() {
                return Err(StoreError::Invalid {
                    kind: "item",
                    reason: "activity payload failed shape validation",
                });
            }
        }

        let activity_json = item
            .activity_json
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock().unwrap();
        item.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        item.created_at = now;
        item.updated_at = now;

        conn.execute(
            r#"INSERT INTO item (id, title, is_selected, category_id, activity_json, is_deleted, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7)"#,
            params![
                &item.id,
                &item.title,
                item.is_selected,
                &item.category_id,
                &activity_json,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_item(&self, id: &str) -> StoreResult<Item> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT * FROM item WHERE id = ?1", params![id], |row| {
            self.row_to_item(row)
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(format!("Item {}", id)),
            _ => StoreError::Database(e),
        })
    }

    /// Rewrite an item's title and activity payload in place.
    pub fn set_item_activity(&self, id: &str, title: &str, activity: &Activity) -> StoreResult<Item> {
        if title.is_empty() {
            return Err(StoreError::Invalid {
                kind: "item",
                reason: "title must be non-empty",
            });
        }
        if !activity.is_valid() {
            return Err(StoreError::Invalid {
                kind: "item",
                reason: "activity payload failed shape validation",
            });
        }

        let activity_json = serde_json::to_string(activity)?;
        {
            let conn = self.conn.lock().unwrap();
            let rows = conn.execute(
                "UPDATE item SET title = ?1, activity_json = ?2, updated_at = ?3 WHERE id = ?4",
                params![title, activity_json, Utc::now().to_rfc3339(), id],
            )?;
            if rows == 0 {
                return Err(StoreError::NotFound(format!("Item {}", id)));
            }
        }
        self.get_item(id)
    }

    pub fn set_item_selected(&self, id: &str, is_selected: bool) -> StoreResult<Item> {
        {
            let conn = self.conn.lock().unwrap();
            let rows = conn.execute(
                "UPDATE item SET is_selected = ?1, updated_at = ?2 WHERE id = ?3",
                params![is_selected, Utc::now().to_rfc3339(), id],
            )?;
            if rows == 0 {
                return Err(StoreError::NotFound(format!("Item {}", id)));
            }
        }
        self.get_item(id)
    }

    pub fn set_item_deleted(&self, id: &str) -> StoreResult<Item> {
        {
            let conn = self.conn.lock().unwrap();
            let rows = conn.execute(
                "UPDATE item SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
                params![Utc::now().to_rfc3339(), id],
            )?;
            if rows == 0 {
                return Err(StoreError::NotFound(format!("Item {}", id)));
            }
        }
        self.get_item(id)
    }

    pub fn count_items(&self) -> StoreResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM item", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_item(&self, row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let is_deleted: Option<i64> = row.get("is_deleted")?;
        Ok(Item {
            id: row.get("id")?,
            title: row.get("title")?,
            is_selected: row.get("is_selected")?,
            category_id: row.get("category_id")?,
            activity_json: parse_activity(row, "activity_json")?,
            is_deleted: is_deleted == Some(1),
            created_at: parse_datetime(row.get::<_, String>("created_at")?),
            updated_at: parse_datetime(row.get::<_, String>("updated_at")?),
        })
    }

    // ==================== ItemOrder Operations ====================

    pub fn insert_item_order(&self, order: &mut ItemOrder) -> StoreResult<()> {
        if !order.order_index.is_finite() {
            return Err(StoreError::Invalid {
                kind: "itemOrder",
                reason: "orderIndex must be finite",
            });
        }

        let conn = self.conn.lock().unwrap();
        order.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        order.created_at = now;
        order.updated_at = now;

        conn.execute(
            r#"INSERT INTO item_order (id, item_id, order_index, is_deleted, created_at, updated_at)
               VALUES (?1, ?2, ?3, NULL, ?4, ?5)"#,
            params![
                &order.id,
                &order.item_id,
                order.order_index,
                order.created_at.to_rfc3339(),
                order.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn set_item_order_deleted(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE item_order SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(format!("ItemOrder {}", id)));
        }
        Ok(())
    }

    // ==================== ActivityLog Operations ====================

    pub fn insert_activity_log(&self, log: &mut ActivityLog) -> StoreResult<()> {
        if !short_string_ok(&log.activity_type) {
            return Err(StoreError::Invalid {
                kind: "activityLog",
                reason: "activityType must be non-empty and at most 50 characters",
            });
        }
        if !short_string_ok(&log.timestamp) {
            return Err(StoreError::Invalid {
                kind: "activityLog",
                reason: "timestamp must be non-empty and at most 50 characters",
            });
        }
        if !log.score.is_finite() {
            return Err(StoreError::Invalid {
                kind: "activityLog",
                reason: "score must be finite",
            });
        }

        let conn = self.conn.lock().unwrap();
        log.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        log.created_at = now;
        log.updated_at = now;

        conn.execute(
            r#"INSERT INTO activity_log (id, item_id, activity_type, timestamp, score, is_deleted, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7)"#,
            params![
                &log.id,
                &log.item_id,
                &log.activity_type,
                &log.timestamp,
                log.score,
                log.created_at.to_rfc3339(),
                log.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn set_activity_log_deleted(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE activity_log SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(format!("ActivityLog {}", id)));
        }
        Ok(())
    }

    // ==================== Seed Data ====================

    /// First-run seed: one "daily" category and two starter items with
    /// explicit order indexes. This is the only path that sets positions;
    /// the create path always inserts index 0.
    pub fn seed_initial_data(&self) -> StoreResult<()> {
        let mut category = ItemCategory {
            id: String::new(),
            name: "daily".to_string(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_category(&mut category)?;

        let starters = [
            ("Drink", "glass-water", 0.0),
            ("Exercise", "person-running", 1.0),
        ];
        for (label, fa_icon, order_index) in starters {
            let mut item = Item {
                id: String::new(),
                title: fa_icon.to_string(),
                is_selected: Some(true),
                category_id: Some(category.id.clone()),
                activity_json: Some(Activity {
                    label: label.to_string(),
                    frequency: None,
                    fa_icon: fa_icon.to_string(),
                    count: 0.0,
                }),
                is_deleted: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.insert_item(&mut item)?;

            let mut order = ItemOrder {
                id: String::new(),
                item_id: item.id.clone(),
                order_index,
                is_deleted: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.insert_item_order(&mut order)?;
            log::info!("Seeded starter item: {}", fa_icon);
        }
        Ok(())
    }

    // ==================== View Queries ====================

    /// All non-deleted categories.
    pub fn categories(&self) -> StoreResult<Vec<CategoryView>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name FROM item_category WHERE is_deleted IS NULL")?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryView {
                id: row.get("id")?,
                name: row.get("name")?,
            })
        })?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    /// Items left-joined to their category and order row. A soft-deleted
    /// joined row excludes the item; an absent one does not.
    pub fn items_view(&self) -> StoreResult<Vec<ItemJoinRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT item.id, item.title, item.is_selected, item.activity_json,
                      item_category.name AS category_name, item.updated_at,
                      item_order.order_index
               FROM item
               LEFT JOIN item_category ON item_category.id = item.category_id
               LEFT JOIN item_order ON item_order.item_id = item.id
               WHERE item.is_deleted IS NULL
                 AND item_category.is_deleted IS NULL
                 AND item_order.is_deleted IS NULL
               ORDER BY item_order.order_index ASC, item.updated_at DESC"#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ItemJoinRow {
                id: row.get("id")?,
                title: row.get("title")?,
                is_selected: row.get("is_selected")?,
                activity_json: parse_activity(row, "activity_json")?,
                category_name: row.get("category_name")?,
                updated_at: parse_datetime(row.get::<_, String>("updated_at")?),
                order_index: row.get("order_index")?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Activity log left-joined to item and category, newest first.
    pub fn activity_view(&self) -> StoreResult<Vec<ActivityView>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT activity_log.timestamp, item.title, activity_log.activity_type,
                      activity_log.score, item_category.name AS category_name,
                      item.activity_json, item.id AS item_id
               FROM activity_log
               LEFT JOIN item ON item.id = activity_log.item_id
               LEFT JOIN item_category ON item_category.id = item.category_id
               WHERE activity_log.is_deleted IS NULL
                 AND item.is_deleted IS NULL
                 AND item_category.is_deleted IS NULL
               ORDER BY activity_log.timestamp DESC"#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ActivityView {
                timestamp: row.get("timestamp")?,
                title: row.get("title")?,
                activity_type: row.get("activity_type")?,
                score: row.get("score")?,
                category_name: row.get("category_name")?,
                activity_json: parse_activity(row, "activity_json")?,
                item_id: row.get("item_id")?,
            })
        })?;

        let mut activity = Vec::new();
        for row in rows {
            activity.push(row?);
        }
        Ok(activity)
    }

    /// One item's own non-deleted log rows, newest insert first.
    pub fn item_activity(&self, item_id: &str) -> StoreResult<Vec<ItemLogEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT timestamp, activity_type, score
               FROM activity_log
               WHERE item_id = ?1 AND is_deleted IS NULL
               ORDER BY created_at DESC"#,
        )?;
        let rows = stmt.query_map(params![item_id], |row| {
            Ok(ItemLogEntry {
                timestamp: row.get("timestamp")?,
                activity_type: row.get("activity_type")?,
                score: row.get("score")?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// A malformed payload is a hard failure on read, not something to paper
/// over with a default.
fn parse_activity(row: &rusqlite::Row, column: &str) -> rusqlite::Result<Option<Activity>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|s| {
        serde_json::from_str(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(title: &str, category_id: Option<String>) -> Item {
        Item {
            id: String::new(),
            title: title.to_string(),
            is_selected: Some(true),
            category_id,
            activity_json: Some(Activity {
                label: "Drink".to_string(),
                frequency: None,
                fa_icon: title.to_string(),
                count: 0.0,
            }),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get_item() {
        let store = Store::in_memory().unwrap();
        let mut item = new_item("glass-water", None);

        store.insert_item(&mut item).unwrap();
        assert!(!item.id.is_empty());

        let retrieved = store.get_item(&item.id).unwrap();
        assert_eq!(retrieved.title, "glass-water");
        assert_eq!(retrieved.is_selected, Some(true));
        assert_eq!(retrieved.activity_json.unwrap().label, "Drink");
    }

    #[test]
    fn test_insert_item_rejects_bad_payload() {
        let store = Store::in_memory().unwrap();
        let mut item = new_item("glass-water", None);
        item.activity_json = Some(Activity {
            label: String::new(),
            frequency: None,
            fa_icon: "glass-water".to_string(),
            count: 0.0,
        });

        let err = store.insert_item(&mut item).unwrap_err();
        assert!(matches!(err, StoreError::Invalid { kind: "item", .. }));
    }

    #[test]
    fn test_insert_category_rejects_long_name() {
        let store = Store::in_memory().unwrap();
        let mut category = ItemCategory {
            id: String::new(),
            name: "x".repeat(51),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let err = store.insert_category(&mut category).unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
    }

    #[test]
    fn test_items_view_joins_category_and_order() {
        let store = Store::in_memory().unwrap();

        let mut category = ItemCategory {
            id: String::new(),
            name: "daily".to_string(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_category(&mut category).unwrap();

        let mut item = new_item("glass-water", Some(category.id.clone()));
        store.insert_item(&mut item).unwrap();

        let mut order = ItemOrder {
            id: String::new(),
            item_id: item.id.clone(),
            order_index: 3.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_item_order(&mut order).unwrap();

        let view = store.items_view().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].category_name.as_deref(), Some("daily"));
        assert_eq!(view[0].order_index, Some(3.0));
    }

    #[test]
    fn test_items_view_sorted_by_order_index() {
        let store = Store::in_memory().unwrap();

        for (title, index) in [("pen", 2.0), ("bed", 0.0), ("utensils", 1.0)] {
            let mut item = new_item(title, None);
            store.insert_item(&mut item).unwrap();
            let mut order = ItemOrder {
                id: String::new(),
                item_id: item.id.clone(),
                order_index: index,
                is_deleted: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            store.insert_item_order(&mut order).unwrap();
        }

        let titles: Vec<String> = store
            .items_view()
            .unwrap()
            .into_iter()
            .map(|row| row.title)
            .collect();
        assert_eq!(titles, vec!["bed", "utensils", "pen"]);
    }

    #[test]
    fn test_soft_deleted_item_hidden_from_views() {
        let store = Store::in_memory().unwrap();

        let mut item = new_item("glass-water", None);
        store.insert_item(&mut item).unwrap();

        let mut log = ActivityLog {
            id: String::new(),
            item_id: item.id.clone(),
            activity_type: "click".to_string(),
            timestamp: Utc::now().timestamp_millis().to_string(),
            score: 1.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_activity_log(&mut log).unwrap();

        store.set_item_deleted(&item.id).unwrap();

        assert!(store.items_view().unwrap().is_empty());
        // The log row survives but disappears from the joined view.
        assert!(store.activity_view().unwrap().is_empty());
        assert_eq!(store.item_activity(&item.id).unwrap().len(), 1);
    }

    #[test]
    fn test_soft_deleted_category_excludes_joined_items() {
        let store = Store::in_memory().unwrap();

        let mut category = ItemCategory {
            id: String::new(),
            name: "daily".to_string(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_category(&mut category).unwrap();

        let mut categorized = new_item("glass-water", Some(category.id.clone()));
        store.insert_item(&mut categorized).unwrap();
        let mut uncategorized = new_item("pen", None);
        store.insert_item(&mut uncategorized).unwrap();

        store.set_category_deleted(&category.id).unwrap();

        assert!(store.categories().unwrap().is_empty());
        let view = store.items_view().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "pen");
    }

    #[test]
    fn test_soft_deleted_order_row_excludes_item() {
        let store = Store::in_memory().unwrap();

        let mut item = new_item("glass-water", None);
        store.insert_item(&mut item).unwrap();
        let mut unordered = new_item("pen", None);
        store.insert_item(&mut unordered).unwrap();

        let mut order = ItemOrder {
            id: String::new(),
            item_id: item.id.clone(),
            order_index: 0.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_item_order(&mut order).unwrap();
        assert_eq!(store.items_view().unwrap().len(), 2);

        store.set_item_order_deleted(&order.id).unwrap();

        // A deleted order row hides its item; an item with no order row at
        // all still passes the left join.
        let view = store.items_view().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "pen");
    }

    #[test]
    fn test_soft_deleted_log_row_hidden_from_views() {
        let store = Store::in_memory().unwrap();

        let mut item = new_item("glass-water", None);
        store.insert_item(&mut item).unwrap();

        let mut kept = ActivityLog {
            id: String::new(),
            item_id: item.id.clone(),
            activity_type: "click".to_string(),
            timestamp: "1700000000000".to_string(),
            score: 1.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_activity_log(&mut kept).unwrap();

        let mut retracted = ActivityLog {
            id: String::new(),
            item_id: item.id.clone(),
            activity_type: "unclick".to_string(),
            timestamp: "1700000100000".to_string(),
            score: -1.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_activity_log(&mut retracted).unwrap();

        store.set_activity_log_deleted(&retracted.id).unwrap();

        let view = store.activity_view().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].activity_type, "click");

        let log = store.item_activity(&item.id).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].timestamp, "1700000000000");
    }

    #[test]
    fn test_seed_initial_data_populates_items_view() {
        let store = Store::in_memory().unwrap();
        store.seed_initial_data().unwrap();

        let view = store.items_view().unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].title, "glass-water");
        assert_eq!(view[1].title, "person-running");
        assert_eq!(view[0].order_index, Some(0.0));
        assert_eq!(view[1].order_index, Some(1.0));
        assert_eq!(view[0].category_name.as_deref(), Some("daily"));
        assert_eq!(view[1].category_name.as_deref(), Some("daily"));

        let categories = store.categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "daily");
    }

    #[test]
    fn test_activity_view_newest_first() {
        let store = Store::in_memory().unwrap();

        let mut item = new_item("glass-water", None);
        store.insert_item(&mut item).unwrap();

        for ts in [1_700_000_000_000_i64, 1_700_000_300_000, 1_700_000_100_000] {
            let mut log = ActivityLog {
                id: String::new(),
                item_id: item.id.clone(),
                activity_type: "click".to_string(),
                timestamp: ts.to_string(),
                score: 1.0,
                is_deleted: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            store.insert_activity_log(&mut log).unwrap();
        }

        let timestamps: Vec<String> = store
            .activity_view()
            .unwrap()
            .into_iter()
            .map(|row| row.timestamp)
            .collect();
        assert_eq!(
            timestamps,
            vec![
                "1700000300000".to_string(),
                "1700000100000".to_string(),
                "1700000000000".to_string(),
            ]
        );
    }
}
