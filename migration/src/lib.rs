pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_guild_table;
mod m20260801_000002_create_moderation_case_table;
mod m20260801_000003_create_ticket_table;
mod m20260801_000004_create_sticky_message_table;
mod m20260801_000005_create_member_table;
mod m20260801_000006_create_ai_conversation_table;
mod m20260801_000007_create_guild_counter_table;
mod m20260801_000008_create_scheduled_action_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_guild_table::Migration),
            Box::new(m20260801_000002_create_moderation_case_table::Migration),
            Box::new(m20260801_000003_create_ticket_table::Migration),
            Box::new(m20260801_000004_create_sticky_message_table::Migration),
            Box::new(m20260801_000005_create_member_table::Migration),
            Box::new(m20260801_000006_create_ai_conversation_table::Migration),
            Box::new(m20260801_000007_create_guild_counter_table::Migration),
            Box::new(m20260801_000008_create_scheduled_action_table::Migration),
        ]
    }
}
