use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};

use infra::models::{EmbeddedExpense as EmbeddedExpenseRow, EmbeddedGroupSnapshot, UserRow};

/// Inline copy of a budget group kept inside a user document. Unlike
/// `BudgetGroup`, its subgroups are stored with it and never re-read.
#[derive(SimpleObject, Clone, Debug)]
pub struct BudgetGroupSnapshot {
    /// Id of the linked group this copy was taken from, if any.
    pub id: Option<ID>,
    pub name: String,
    pub subgroups: Vec<BudgetGroupSnapshot>,
}

impl From<EmbeddedGroupSnapshot> for BudgetGroupSnapshot {
    fn from(snapshot: EmbeddedGroupSnapshot) -> Self {
        Self {
            id: snapshot.id.map(Into::into),
            name: snapshot.name,
            subgroups: snapshot.subgroups.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct EmbeddedExpense {
    pub name: String,
    pub value: f64,
    pub group: Option<String>,
    pub subgroup: Option<BudgetGroupSnapshot>,
    pub timestamp: DateTime<Utc>,
}

impl From<EmbeddedExpenseRow> for EmbeddedExpense {
    fn from(row: EmbeddedExpenseRow) -> Self {
        Self {
            name: row.name,
            value: row.value,
            group: row.group,
            subgroup: row.subgroup.map(Into::into),
            timestamp: row.timestamp,
        }
    }
}

// No password field: credentials stay in the store.
#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub expenses: Vec<EmbeddedExpense>,
    pub budget_groups: Vec<BudgetGroupSnapshot>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            username: row.username,
            expenses: row.expenses.into_iter().map(Into::into).collect(),
            budget_groups: row.budget_groups.into_iter().map(Into::into).collect(),
        }
    }
}
