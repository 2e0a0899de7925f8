use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait, ExprTrait};

use entity::guild_counter::{ActiveModel, Column, CounterScope};

/// Hands out per-guild sequential ids for cases and tickets.
///
/// The increment is a single upsert statement with `RETURNING`: insert the
/// row at 1, or bump the existing value. Concurrent callers can never
/// observe the same id. Next ids are never computed by reading a maximum in
/// application code.
pub struct CounterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CounterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Allocates the next id for (guild, scope). First allocation returns 1.
    pub async fn next_id(&self, guild_id: u64, scope: CounterScope) -> Result<i32, DbErr> {
        let model = entity::prelude::GuildCounter::insert(ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            scope: ActiveValue::Set(scope),
            value: ActiveValue::Set(1),
        })
        .on_conflict(
            OnConflict::columns([Column::GuildId, Column::Scope])
                .value(Column::Value, Expr::col(Column::Value).add(1))
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(model.value)
    }

    /// Last id handed out, without allocating. 0 when nothing was issued.
    pub async fn current(&self, guild_id: u64, scope: CounterScope) -> Result<i32, DbErr> {
        let row = entity::prelude::GuildCounter::find_by_id((guild_id.to_string(), scope))
            .one(self.db)
            .await?;
        Ok(row.map(|row| row.value).unwrap_or(0))
    }
}
