use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Result as SqlxResult};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{BudgetGroupRecord, BudgetGroupRow, NewBudgetGroup};
use crate::store::GroupStore;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<BudgetGroupRow>> {
    let records = sqlx::query_as::<_, BudgetGroupRecord>(
        r#"
        SELECT id, name, subgroups, created_at
        FROM budget_groups
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(records.into_iter().map(BudgetGroupRow::from).collect())
}

pub async fn get_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> SqlxResult<Vec<BudgetGroupRow>> {
    let records = sqlx::query_as::<_, BudgetGroupRecord>(
        r#"
        SELECT id, name, subgroups, created_at
        FROM budget_groups
        WHERE id = ANY($1::uuid[])
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await?;

    Ok(records.into_iter().map(BudgetGroupRow::from).collect())
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    group: NewBudgetGroup,
) -> SqlxResult<BudgetGroupRow> {
    let row = group.into_row();

    let record = sqlx::query_as::<_, BudgetGroupRecord>(
        r#"
        INSERT INTO budget_groups (id, name, subgroups, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, subgroups, created_at
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.subgroups)
    .bind(row.created_at)
    .fetch_one(executor)
    .await?;

    Ok(record.into())
}

pub struct BudgetGroupRepo {
    db: PgPool,
}

impl BudgetGroupRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupStore for BudgetGroupRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.db).await?;
        Ok(())
    }

    async fn list_groups(&self) -> StoreResult<Vec<BudgetGroupRow>> {
        Ok(list(&self.db).await?)
    }

    async fn insert_group(&self, group: NewBudgetGroup) -> StoreResult<BudgetGroupRow> {
        Ok(insert(&self.db, group).await?)
    }

    async fn groups_by_ids(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, BudgetGroupRow>> {
        let rows = get_by_ids(&self.db, ids).await?;
        Ok(rows.into_iter().map(|r| (r.id, r)).collect())
    }
}
