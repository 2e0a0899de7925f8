use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Fluent builder for test contexts. Each `with_table` derives the CREATE
/// TABLE statement from the entity definition, so tests never drift from
/// the real schema.
#[derive(Default)]
pub struct TestBuilder {
    stmts: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity's table for creation.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.stmts.push(schema.create_table_from_entity(entity));
        self
    }

    /// Builds the context: connects the in-memory database and creates all
    /// registered tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.stmts).await?;
        Ok(context)
    }
}
