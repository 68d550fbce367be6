//! Conversions between the two shapes of a budget group.
//!
//! Top-level groups are stored as linked records whose children are ids
//! ([`BudgetGroupRow`]). Users carry embedded copies whose children are inline
//! ([`EmbeddedGroupSnapshot`]). Nothing converts between them implicitly.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{BudgetGroupRow, EmbeddedGroupSnapshot};

/// Copy a linked group and its reachable subgroups into an inline snapshot.
///
/// `index` must contain every record that may be referenced. References back
/// to an ancestor and references missing from `index` are dropped. Children
/// below `max_depth` levels are cut off (the root is depth 0).
pub fn snapshot_group(
    root: &BudgetGroupRow,
    index: &HashMap<Uuid, BudgetGroupRow>,
    max_depth: usize,
) -> EmbeddedGroupSnapshot {
    let mut ancestors = Vec::new();
    snapshot_inner(root, index, max_depth, &mut ancestors)
}

fn snapshot_inner(
    group: &BudgetGroupRow,
    index: &HashMap<Uuid, BudgetGroupRow>,
    remaining: usize,
    ancestors: &mut Vec<Uuid>,
) -> EmbeddedGroupSnapshot {
    let mut snapshot = EmbeddedGroupSnapshot {
        id: Some(group.id),
        name: group.name.clone(),
        subgroups: Vec::new(),
    };

    if remaining == 0 {
        return snapshot;
    }

    ancestors.push(group.id);
    for child_id in &group.subgroups {
        if ancestors.contains(child_id) {
            tracing::warn!(parent = %group.id, child = %child_id, "skipping cyclic subgroup reference");
            continue;
        }
        match index.get(child_id) {
            Some(child) => snapshot
                .subgroups
                .push(snapshot_inner(child, index, remaining - 1, ancestors)),
            None => {
                tracing::warn!(parent = %group.id, child = %child_id, "skipping dangling subgroup reference")
            }
        }
    }
    ancestors.pop();

    snapshot
}

impl EmbeddedGroupSnapshot {
    /// Turn an inline tree into linked records with fresh ids.
    ///
    /// The root comes first, followed by its descendants in pre-order. Origin
    /// ids on the snapshot are ignored: the result is a new, independent tree.
    pub fn into_linked(self) -> Vec<BudgetGroupRow> {
        let mut rows = Vec::new();
        link_inner(self, &mut rows);
        rows
    }
}

fn link_inner(snapshot: EmbeddedGroupSnapshot, rows: &mut Vec<BudgetGroupRow>) -> Uuid {
    let id = Uuid::new_v4();
    let slot = rows.len();
    rows.push(BudgetGroupRow {
        id,
        name: snapshot.name,
        subgroups: Vec::new(),
        created_at: Utc::now(),
    });

    let children: Vec<Uuid> = snapshot
        .subgroups
        .into_iter()
        .map(|child| link_inner(child, rows))
        .collect();
    rows[slot].subgroups = children;

    id
}
