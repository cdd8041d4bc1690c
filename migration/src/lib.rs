pub use sea_orm_migration::prelude::*;

mod m20260502_101500_create_table_principal;
mod m20260502_103042_create_catalog_tables;
mod m20260503_091811_create_profile_tables;
mod m20260505_140259_create_table_routine;
mod m20260505_142731_create_attendance_tables;
mod m20260508_110004_create_table_course_tracking;
mod m20260512_153318_create_workflow_tables;
mod m20260514_090047_create_feedback_and_notification_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260502_101500_create_table_principal::Migration),
            Box::new(m20260502_103042_create_catalog_tables::Migration),
            Box::new(m20260503_091811_create_profile_tables::Migration),
            Box::new(m20260505_140259_create_table_routine::Migration),
            Box::new(m20260505_142731_create_attendance_tables::Migration),
            Box::new(m20260508_110004_create_table_course_tracking::Migration),
            Box::new(m20260512_153318_create_workflow_tables::Migration),
            Box::new(m20260514_090047_create_feedback_and_notification_tables::Migration),
        ]
    }
}
