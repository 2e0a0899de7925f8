use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Looks up a guild's stored settings row.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Settings exist
    /// - `Ok(None)` - Guild has never been configured
    /// - `Err(DbErr)` - Database error
    pub async fn find_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::guild::Model>, DbErr> {
        entity::prelude::Guild::find()
            .filter(entity::guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await
    }

    /// Sets the legacy-command prefix, creating the row on first write.
    pub async fn set_prefix(
        &self,
        guild_id: u64,
        prefix: String,
    ) -> Result<entity::guild::Model, DbErr> {
        match self.find_by_guild_id(guild_id).await? {
            Some(existing) => {
                let mut active: entity::guild::ActiveModel = existing.into();
                active.prefix = ActiveValue::Set(prefix);
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await
            }
            None => {
                let mut fresh = Self::fresh(guild_id);
                fresh.prefix = ActiveValue::Set(prefix);
                fresh.insert(self.db).await
            }
        }
    }

    /// Flips one module toggle, creating the row on first write. `key` is a
    /// `ModuleCategory` key; validation happens at the API boundary.
    pub async fn toggle_module(
        &self,
        guild_id: u64,
        key: &str,
        enabled: bool,
    ) -> Result<entity::guild::Model, DbErr> {
        match self.find_by_guild_id(guild_id).await? {
            Some(existing) => {
                let mut modules = existing.modules_enabled.clone();
                if let Some(map) = modules.as_object_mut() {
                    map.insert(key.to_string(), serde_json::Value::Bool(enabled));
                } else {
                    modules = serde_json::json!({ key: enabled });
                }
                let mut active: entity::guild::ActiveModel = existing.into();
                active.modules_enabled = ActiveValue::Set(modules);
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await
            }
            None => {
                let mut fresh = Self::fresh(guild_id);
                fresh.modules_enabled = ActiveValue::Set(serde_json::json!({ key: enabled }));
                fresh.insert(self.db).await
            }
        }
    }

    /// Stores the welcome configuration. Exactly one of message/embed is
    /// kept; the other is cleared, matching the dashboard's mode switch.
    pub async fn update_welcome(
        &self,
        guild_id: u64,
        channel: Option<String>,
        message: Option<String>,
        embed: Option<serde_json::Value>,
    ) -> Result<entity::guild::Model, DbErr> {
        let apply = |active: &mut entity::guild::ActiveModel| {
            active.welcome_channel = ActiveValue::Set(channel.clone());
            active.welcome_message = ActiveValue::Set(message.clone());
            active.welcome_embed = ActiveValue::Set(embed.clone());
        };

        match self.find_by_guild_id(guild_id).await? {
            Some(existing) => {
                let mut active: entity::guild::ActiveModel = existing.into();
                apply(&mut active);
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await
            }
            None => {
                let mut fresh = Self::fresh(guild_id);
                apply(&mut fresh);
                fresh.insert(self.db).await
            }
        }
    }

    /// Stores ticket configuration and merges the given keys into the
    /// settings blob (support roles, ticket types, panel bookkeeping).
    pub async fn update_ticket_config(
        &self,
        guild_id: u64,
        category: Option<String>,
        message: Option<String>,
        settings_patch: serde_json::Value,
    ) -> Result<entity::guild::Model, DbErr> {
        match self.find_by_guild_id(guild_id).await? {
            Some(existing) => {
                let mut settings = existing.settings.clone();
                merge_object(&mut settings, &settings_patch);
                let mut active: entity::guild::ActiveModel = existing.into();
                active.ticket_category = ActiveValue::Set(category);
                active.ticket_message = ActiveValue::Set(message);
                active.settings = ActiveValue::Set(settings);
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await
            }
            None => {
                let mut fresh = Self::fresh(guild_id);
                fresh.ticket_category = ActiveValue::Set(category);
                fresh.ticket_message = ActiveValue::Set(message);
                let mut settings = serde_json::json!({});
                merge_object(&mut settings, &settings_patch);
                fresh.settings = ActiveValue::Set(settings);
                fresh.insert(self.db).await
            }
        }
    }

    /// Active model with the defaults every first write shares.
    fn fresh(guild_id: u64) -> entity::guild::ActiveModel {
        entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            prefix: ActiveValue::Set("!".to_string()),
            modules_enabled: ActiveValue::Set(serde_json::json!({})),
            settings: ActiveValue::Set(serde_json::json!({})),
            premium: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
    }
}

/// Shallow-merges `patch`'s top-level keys into `target`.
fn merge_object(target: &mut serde_json::Value, patch: &serde_json::Value) {
    let Some(patch) = patch.as_object() else {
        return;
    };
    if !target.is_object() {
        *target = serde_json::json!({});
    }
    if let Some(map) = target.as_object_mut() {
        for (key, value) in patch {
            map.insert(key.clone(), value.clone());
        }
    }
}
