use crate::entities::{directors, genres, movies};
use crate::models::{DirectorUpdate, GenreUpdate, MovieUpdate, NewDirector, NewGenre, NewMovie};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::DeleteOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn director_repo(&self) -> repositories::director::DirectorRepository {
        repositories::director::DirectorRepository::new(self.conn.clone())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<movies::Model>> {
        self.movie_repo().get(id).await
    }

    pub async fn list_movies(
        &self,
        director_id: Option<i32>,
        genre_id: Option<i32>,
    ) -> Result<Vec<movies::Model>> {
        self.movie_repo().list(director_id, genre_id).await
    }

    pub async fn create_movie(&self, new: NewMovie) -> Result<movies::Model> {
        self.movie_repo().create(new).await
    }

    pub async fn update_movie(&self, id: i32, update: MovieUpdate) -> Result<u64> {
        self.movie_repo().update(id, update).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<u64> {
        self.movie_repo().delete(id).await
    }

    pub async fn get_director(&self, id: i32) -> Result<Option<directors::Model>> {
        self.director_repo().get(id).await
    }

    pub async fn list_directors(&self) -> Result<Vec<directors::Model>> {
        self.director_repo().list().await
    }

    pub async fn create_director(&self, new: NewDirector) -> Result<directors::Model> {
        self.director_repo().create(new).await
    }

    pub async fn update_director(&self, id: i32, update: DirectorUpdate) -> Result<u64> {
        self.director_repo().update(id, update).await
    }

    pub async fn delete_director(&self, id: i32) -> Result<DeleteOutcome> {
        self.director_repo().delete(id).await
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<genres::Model>> {
        self.genre_repo().get(id).await
    }

    pub async fn list_genres(&self) -> Result<Vec<genres::Model>> {
        self.genre_repo().list().await
    }

    pub async fn create_genre(&self, new: NewGenre) -> Result<genres::Model> {
        self.genre_repo().create(new).await
    }

    pub async fn update_genre(&self, id: i32, update: GenreUpdate) -> Result<u64> {
        self.genre_repo().update(id, update).await
    }

    pub async fn delete_genre(&self, id: i32) -> Result<DeleteOutcome> {
        self.genre_repo().delete(id).await
    }
}
