pub use sea_orm_migration::prelude::*;

mod m20260310_101500_create_users_table;
mod m20260310_103200_create_portfolio_tables;
mod m20260311_091800_create_contacts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260310_101500_create_users_table::Migration),
            Box::new(m20260310_103200_create_portfolio_tables::Migration),
            Box::new(m20260311_091800_create_contacts_table::Migration),
        ]
    }
}
