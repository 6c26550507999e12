use crate::entities::{genres, movies, prelude::*};
use crate::models::{GenreUpdate, NewGenre};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::DeleteOutcome;

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<genres::Model>> {
        Ok(Genres::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> Result<Vec<genres::Model>> {
        Ok(Genres::find()
            .order_by_asc(genres::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn create(&self, new: NewGenre) -> Result<genres::Model> {
        let txn = self.conn.begin().await?;
        let model = genres::ActiveModel {
            name: Set(new.name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, update: GenreUpdate) -> Result<u64> {
        anyhow::ensure!(!update.is_empty(), "genre update carries no fields");

        let txn = self.conn.begin().await?;
        let mut query = Genres::update_many().filter(genres::Column::Id.eq(id));
        if let Some(name) = update.name {
            query = query.col_expr(genres::Column::Name, Expr::value(name));
        }

        let result = query.exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
        }
        Ok(result.rows_affected)
    }

    /// Restrict policy: a genre still referenced by movies is not deleted.
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome> {
        let txn = self.conn.begin().await?;

        let referencing = Movies::find()
            .filter(movies::Column::GenreId.eq(id))
            .count(&txn)
            .await?;
        if referencing > 0 {
            return Ok(DeleteOutcome::Referenced { movies: referencing });
        }

        let result = Genres::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
