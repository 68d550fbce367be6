use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Budget group as it is kept in the store: children are reference links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGroupRow {
    pub id: Uuid,
    pub name: String,
    pub subgroups: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Raw `budget_groups` row. Columns are nullable because documents written by
/// other clients are not guaranteed to carry every field.
#[derive(Debug, Clone, FromRow)]
pub struct BudgetGroupRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub subgroups: Option<Vec<Uuid>>,
    pub created_at: DateTime<Utc>,
}

impl From<BudgetGroupRecord> for BudgetGroupRow {
    /// Missing name becomes `""`, missing subgroups become `[]`.
    fn from(record: BudgetGroupRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.unwrap_or_default(),
            subgroups: record.subgroups.unwrap_or_default(),
            created_at: record.created_at,
        }
    }
}

/// Insert payload for a budget group. New groups never start with children.
#[derive(Debug, Clone)]
pub struct NewBudgetGroup {
    pub name: String,
}

impl NewBudgetGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Assigns the store-side fields.
    pub fn into_row(self) -> BudgetGroupRow {
        BudgetGroupRow {
            id: Uuid::new_v4(),
            name: self.name,
            subgroups: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub value: Option<f64>,
    pub group: Option<String>,
    pub subgroup_id: Option<Uuid>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Expense attributed to a budget group by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    /// Free-text label, unrelated to the group graph.
    pub group: Option<String>,
    pub subgroup: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl From<ExpenseRecord> for ExpenseRow {
    /// Missing numeric value becomes `0.0`; a missing timestamp falls back to
    /// the Unix epoch so that it sorts first instead of looking recent.
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.unwrap_or_default(),
            value: record.value.unwrap_or_default(),
            group: record.group,
            subgroup: record.subgroup_id,
            timestamp: record.timestamp.unwrap_or_default(),
        }
    }
}

/// Inline copy of a budget group, stored inside a parent document.
///
/// Diverges independently from the linked record it may have been copied
/// from; `id` only remembers that origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbeddedGroupSnapshot {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subgroups: Vec<EmbeddedGroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedExpense {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub subgroup: Option<EmbeddedGroupSnapshot>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
    pub expenses: Json<Vec<EmbeddedExpense>>,
    pub budget_groups: Json<Vec<EmbeddedGroupSnapshot>>,
}

/// User document. Groups and expenses are embedded copies, not links.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    /// Never returned through the API.
    pub password_hash: Option<String>,
    pub expenses: Vec<EmbeddedExpense>,
    pub budget_groups: Vec<EmbeddedGroupSnapshot>,
}

impl From<UserRecord> for UserRow {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            expenses: record.expenses.0,
            budget_groups: record.budget_groups.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_group_fields_default_to_empty() {
        let id = Uuid::new_v4();
        let row = BudgetGroupRow::from(BudgetGroupRecord {
            id,
            name: None,
            subgroups: None,
            created_at: Utc::now(),
        });

        assert_eq!(row.id, id);
        assert_eq!(row.name, "");
        assert!(row.subgroups.is_empty());
    }

    #[test]
    fn new_group_starts_without_subgroups() {
        let row = NewBudgetGroup::new("Food").into_row();
        assert_eq!(row.name, "Food");
        assert!(row.subgroups.is_empty());
    }

    #[test]
    fn expense_record_defaults() {
        let row = ExpenseRow::from(ExpenseRecord {
            id: Uuid::new_v4(),
            name: Some("Coffee".into()),
            value: None,
            group: Some("Food".into()),
            subgroup_id: None,
            timestamp: None,
        });

        assert_eq!(row.value, 0.0);
        assert_eq!(row.timestamp, DateTime::<Utc>::default());
        assert_eq!(row.group.as_deref(), Some("Food"));
    }

    #[test]
    fn embedded_snapshot_tolerates_missing_fields() {
        let snapshot: EmbeddedGroupSnapshot =
            serde_json::from_str(r#"{"name":"Rent"}"#).unwrap();
        assert_eq!(snapshot.name, "Rent");
        assert!(snapshot.id.is_none());
        assert!(snapshot.subgroups.is_empty());
    }

    #[test]
    fn user_record_unwraps_embedded_documents() {
        let user = UserRow::from(UserRecord {
            id: Uuid::new_v4(),
            username: "sam".into(),
            password_hash: None,
            expenses: Json(Vec::new()),
            budget_groups: Json(vec![EmbeddedGroupSnapshot {
                name: "Travel".into(),
                ..Default::default()
            }]),
        });

        assert!(user.expenses.is_empty());
        assert_eq!(user.budget_groups[0].name, "Travel");
    }
}
