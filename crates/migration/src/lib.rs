pub use sea_orm_migration::prelude::*;

mod m20250601_create_coaching_tables;
mod m20250602_add_indexes;
mod m20250603_link_video_section_group;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_create_coaching_tables::Migration),
            Box::new(m20250602_add_indexes::Migration),
            Box::new(m20250603_link_video_section_group::Migration),
        ]
    }
}
