use crate::entities::{directors, movies, prelude::*};
use crate::models::{DirectorUpdate, NewDirector};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::DeleteOutcome;

pub struct DirectorRepository {
    conn: DatabaseConnection,
}

impl DirectorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<directors::Model>> {
        Ok(Directors::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> Result<Vec<directors::Model>> {
        Ok(Directors::find()
            .order_by_asc(directors::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn create(&self, new: NewDirector) -> Result<directors::Model> {
        let txn = self.conn.begin().await?;
        let model = directors::ActiveModel {
            name: Set(new.name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, update: DirectorUpdate) -> Result<u64> {
        anyhow::ensure!(!update.is_empty(), "director update carries no fields");

        let txn = self.conn.begin().await?;
        let mut query = Directors::update_many().filter(directors::Column::Id.eq(id));
        if let Some(name) = update.name {
            query = query.col_expr(directors::Column::Name, Expr::value(name));
        }

        let result = query.exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
        }
        Ok(result.rows_affected)
    }

    /// Deletes the director unless movies still reference it (restrict
    /// policy). The reference check and the delete share one transaction.
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome> {
        let txn = self.conn.begin().await?;

        let referencing = Movies::find()
            .filter(movies::Column::DirectorId.eq(id))
            .count(&txn)
            .await?;
        if referencing > 0 {
            return Ok(DeleteOutcome::Referenced { movies: referencing });
        }

        let result = Directors::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
