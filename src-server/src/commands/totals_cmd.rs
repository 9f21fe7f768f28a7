//! Totals Commands
//!
//! Per-category summaries of a room, recomputed from storage on every call.

use potluck_totals::{aggregate, format_quantity, Bucket, ContributedItem, ItemKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::DomainResult;
use crate::AppState;
use super::room_cmd::require_room;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    pub name: String,
    pub quantity: f64,
    pub quantity_label: String,
    pub contributors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketView {
    pub category: String,
    pub total_quantity: f64,
    pub total_label: String,
    pub entry_count: usize,
    pub entries: Vec<EntryView>,
}

/// Ordered buckets for one item kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsView {
    pub kind: ItemKind,
    pub buckets: Vec<BucketView>,
}

impl TotalsView {
    fn build(kind: ItemKind, items: &[ContributedItem]) -> Self {
        let buckets = aggregate(items)
            .into_iter()
            .map(|bucket| bucket_view(bucket, kind))
            .collect();
        Self { kind, buckets }
    }
}

fn bucket_view(bucket: Bucket, kind: ItemKind) -> BucketView {
    let entries: Vec<EntryView> = bucket
        .entries
        .into_iter()
        .map(|entry| EntryView {
            quantity_label: format_quantity(entry.quantity, kind),
            name: entry.name,
            quantity: entry.quantity,
            contributors: entry.contributors.into_iter().collect(),
        })
        .collect();

    BucketView {
        total_label: format_quantity(bucket.total_quantity, kind),
        category: bucket.category_key,
        total_quantity: bucket.total_quantity,
        entry_count: entries.len(),
        entries,
    }
}

pub async fn dish_totals(state: &AppState, room_id: u32) -> DomainResult<TotalsView> {
    require_room(state, room_id).await?;
    let dishes = state.dishes.all_in_room(room_id).await?;
    let items: Vec<ContributedItem> = dishes.iter().map(ContributedItem::from).collect();

    debug!(room_id, items = items.len(), "aggregating dishes");
    Ok(TotalsView::build(ItemKind::Dish, &items))
}

pub async fn drink_totals(state: &AppState, room_id: u32) -> DomainResult<TotalsView> {
    require_room(state, room_id).await?;
    let drinks = state.drinks.all_in_room(room_id).await?;
    let items: Vec<ContributedItem> = drinks.iter().map(ContributedItem::from).collect();

    debug!(room_id, items = items.len(), "aggregating drinks");
    Ok(TotalsView::build(ItemKind::Drink, &items))
}
