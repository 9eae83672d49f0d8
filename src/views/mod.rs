use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::models::*;
use crate::store::{Store, StoreError, StoreResult};

/// Mutation failures are a distinguishable sum type so callers can present
/// specific feedback (a toast) instead of crashing the view layer.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Failed to create item")]
    ItemCreate(#[source] StoreError),
    #[error("Failed to create item order")]
    OrderCreate(#[source] StoreError),
    #[error("categoryId is required for creating new items")]
    CategoryRequired,
    #[error("Failed to update item")]
    ItemUpdate(#[source] StoreError),
    #[error("Failed to delete item")]
    ItemDelete(#[source] StoreError),
    #[error("Failed to toggle item selection")]
    ToggleSelection(#[source] StoreError),
    #[error("Failed to create activity log")]
    ActivityLogCreate(#[source] StoreError),
}

pub struct UpsertItemRequest<'a> {
    pub id: Option<&'a str>,
    pub label: &'a str,
    pub fa_icon: &'a str,
    pub frequency: Option<&'a str>,
    pub category_id: Option<&'a str>,
    pub is_selected: bool,
}

/// Read-shaping and write-orchestration over the store. The store is
/// injected rather than reached through a global, so tests can substitute
/// an in-memory one.
#[derive(Clone)]
pub struct ViewBuilder {
    store: Arc<Store>,
}

impl ViewBuilder {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    // ==================== Read Projections ====================

    pub fn categories(&self) -> StoreResult<Vec<CategoryView>> {
        self.store.categories()
    }

    /// Items view with `is_selected` normalized from its tri-state storage
    /// representation to a strict bool: only a stored `true` counts.
    pub fn items(&self) -> StoreResult<Vec<ItemView>> {
        let rows = self.store.items_view()?;
        Ok(rows
            .into_iter()
            .map(|row| ItemView {
                id: row.id,
                title: row.title,
                is_selected: row.is_selected == Some(true),
                activity_json: row.activity_json,
                category_name: row.category_name,
                updated_at: row.updated_at,
                order_index: row.order_index,
            })
            .collect())
    }

    pub fn activity(&self) -> StoreResult<Vec<ActivityView>> {
        self.store.activity_view()
    }

    pub fn item_activity(&self, item_id: &str) -> StoreResult<Vec<ItemLogEntry>> {
        self.store.item_activity(item_id)
    }

    // ==================== Mutations ====================

    /// Insert an Item and its ItemOrder row together. A rejection of either
    /// insert surfaces as a single creation error.
    pub fn create_item(
        &self,
        label: &str,
        fa_icon: &str,
        category_id: &str,
    ) -> Result<Item, ViewError> {
        let mut item = Item {
            id: String::new(),
            title: fa_icon.to_string(),
            is_selected: Some(true),
            category_id: Some(category_id.to_string()),
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
        self.store
            .insert_item(&mut item)
            .map_err(ViewError::ItemCreate)?;

        let mut order = ItemOrder {
            id: String::new(),
            item_id: item.id.clone(),
            // TODO: Calculate actual next order index
            order_index: 0.0,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store
            .insert_item_order(&mut order)
            .map_err(ViewError::OrderCreate)?;

        Ok(item)
    }

    /// Shared upsert: with an id, rewrite the item's title and payload in
    /// place; without one, insert, which requires a category id.
    pub fn upsert_item(&self, req: &UpsertItemRequest) -> Result<Item, ViewError> {
        let activity = Activity {
            label: req.label.to_string(),
            frequency: req.frequency.map(|f| f.to_string()),
            fa_icon: req.fa_icon.to_string(),
            count: 0.0,
        };

        if let Some(id) = req.id {
            return self
                .store
                .set_item_activity(id, req.fa_icon, &activity)
                .map_err(ViewError::ItemUpdate);
        }

        let Some(category_id) = req.category_id else {
            return Err(ViewError::CategoryRequired);
        };

        let mut item = Item {
            id: String::new(),
            title: req.fa_icon.to_string(),
            is_selected: Some(req.is_selected),
            category_id: Some(category_id.to_string()),
            activity_json: Some(activity),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store
            .insert_item(&mut item)
            .map_err(ViewError::ItemCreate)?;
        Ok(item)
    }

    pub fn update_item(
        &self,
        id: &str,
        label: &str,
        fa_icon: &str,
        frequency: Option<&str>,
    ) -> Result<Item, ViewError> {
        self.upsert_item(&UpsertItemRequest {
            id: Some(id),
            label,
            fa_icon,
            frequency,
            category_id: None,
            is_selected: true,
        })
    }

    /// Soft-delete the item only. Its ActivityLog and ItemOrder rows stay
    /// behind; the view joins hide them.
    pub fn delete_item(&self, id: &str) -> Result<Item, ViewError> {
        self.store.set_item_deleted(id).map_err(ViewError::ItemDelete)
    }

    pub fn toggle_item_selection(&self, id: &str, is_selected: bool) -> Result<Item, ViewError> {
        self.store
            .set_item_selected(id, is_selected)
            .map_err(ViewError::ToggleSelection)
    }

    /// Insert a log row stamped with the current time. Fire-and-forget from
    /// the caller's perspective; a rejection is logged and returned so the
    /// UI can raise a notification.
    pub fn create_activity_log(
        &self,
        item_id: &str,
        activity_type: &str,
        score: f64,
    ) -> Result<ActivityLog, ViewError> {
        let mut log = ActivityLog {
            id: String::new(),
            item_id: item_id.to_string(),
            activity_type: activity_type.to_string(),
            timestamp: Utc::now().timestamp_millis().to_string(),
            score,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.insert_activity_log(&mut log).map_err(|e| {
            log::error!("Failed to create activity log: {}", e);
            ViewError::ActivityLogCreate(e)
        })?;
        Ok(log)
    }
}
