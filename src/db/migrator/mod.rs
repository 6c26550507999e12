use sea_orm_migration::prelude::*;

mod m20260715_initial;
mod m20260722_add_movie_fk_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_initial::Migration),
            Box::new(m20260722_add_movie_fk_indexes::Migration),
        ]
    }
}
