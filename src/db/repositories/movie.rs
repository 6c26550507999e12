use crate::entities::{movies, prelude::*};
use crate::models::{MovieUpdate, NewMovie};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>> {
        Ok(Movies::find_by_id(id).one(&self.conn).await?)
    }

    /// Lists movies, optionally narrowed by director and/or genre. Both
    /// filters compose conjunctively.
    pub async fn list(
        &self,
        director_id: Option<i32>,
        genre_id: Option<i32>,
    ) -> Result<Vec<movies::Model>> {
        let mut query = Movies::find();
        if let Some(id) = director_id {
            query = query.filter(movies::Column::DirectorId.eq(id));
        }
        if let Some(id) = genre_id {
            query = query.filter(movies::Column::GenreId.eq(id));
        }
        Ok(query.order_by_asc(movies::Column::Id).all(&self.conn).await?)
    }

    pub async fn create(&self, new: NewMovie) -> Result<movies::Model> {
        let txn = self.conn.begin().await?;
        let model = movies::ActiveModel {
            title: Set(new.title),
            year: Set(new.year),
            rating: Set(new.rating),
            director_id: Set(new.director_id),
            genre_id: Set(new.genre_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Applies the provided fields to the row matching `id`, returning the
    /// affected row count. Commits only when exactly one row changed; the
    /// transaction rolls back on drop otherwise.
    pub async fn update(&self, id: i32, update: MovieUpdate) -> Result<u64> {
        anyhow::ensure!(!update.is_empty(), "movie update carries no fields");

        let txn = self.conn.begin().await?;
        let mut query = Movies::update_many().filter(movies::Column::Id.eq(id));
        if let Some(title) = update.title {
            query = query.col_expr(movies::Column::Title, Expr::value(title));
        }
        if let Some(year) = update.year {
            query = query.col_expr(movies::Column::Year, Expr::value(year));
        }
        if let Some(rating) = update.rating {
            query = query.col_expr(movies::Column::Rating, Expr::value(rating));
        }
        if let Some(director_id) = update.director_id {
            query = query.col_expr(movies::Column::DirectorId, Expr::value(director_id));
        }
        if let Some(genre_id) = update.genre_id {
            query = query.col_expr(movies::Column::GenreId, Expr::value(genre_id));
        }

        let result = query.exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
        }
        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let txn = self.conn.begin().await?;
        let result = Movies::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 1 {
            txn.commit().await?;
        }
        Ok(result.rows_affected)
    }
}
