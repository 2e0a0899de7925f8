use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, ChannelType, Colour, CreateActionRow, CreateButton, CreateChannel,
    CreateEmbed, CreateMessage, GuildId, PermissionOverwrite, PermissionOverwriteType,
    Permissions, RoleId, Timestamp, User, UserId,
};
use serenity::http::Http;

use entity::guild_counter::CounterScope;

use crate::{
    data::{counter::CounterRepository, guild::GuildRepository, ticket::TicketRepository},
    error::AppError,
    realtime::{Broadcaster, GuildUpdateKind},
};

/// Delay between announcing a close and deleting the channel.
const CHANNEL_DELETE_DELAY: Duration = Duration::from_secs(5);

/// Result of a ticket-open attempt.
pub enum TicketOpen {
    Created {
        ticket: entity::ticket::Model,
        channel_id: ChannelId,
    },
    /// The opener already has an open ticket; no new one is created.
    AlreadyOpen { channel_id: String },
}

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    broadcaster: &'a Broadcaster,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection, broadcaster: &'a Broadcaster) -> Self {
        Self { db, broadcaster }
    }

    /// Opens a ticket: allocates the next ticket number, creates the
    /// permission-scoped channel, persists the row and posts the welcome
    /// message with the close/claim buttons.
    pub async fn open(
        &self,
        http: &Http,
        guild_id: GuildId,
        bot_id: UserId,
        user: &User,
        category_label: &str,
    ) -> Result<TicketOpen, AppError> {
        let repo = TicketRepository::new(self.db);

        if let Some(existing) = repo.find_open_by_user(guild_id.get(), user.id.get()).await? {
            return Ok(TicketOpen::AlreadyOpen {
                channel_id: existing.channel_id,
            });
        }

        let guild_config = GuildRepository::new(self.db)
            .find_by_guild_id(guild_id.get())
            .await?;
        let support_roles = guild_config
            .as_ref()
            .map(|guild| support_roles(&guild.settings))
            .unwrap_or_default();
        let parent_category = guild_config
            .as_ref()
            .and_then(|guild| guild.ticket_category.as_deref())
            .and_then(|id| id.parse::<u64>().ok());

        let ticket_id = CounterRepository::new(self.db)
            .next_id(guild_id.get(), CounterScope::Ticket)
            .await?;

        let name = channel_name(ticket_id, &user.name);
        let mut overwrites = vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                // The @everyone role shares the guild's id.
                kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
            },
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(user.id),
            },
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::MANAGE_CHANNELS,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(bot_id),
            },
        ];
        for role_id in &support_roles {
            overwrites.push(PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(RoleId::new(*role_id)),
            });
        }

        let mut builder = CreateChannel::new(name)
            .kind(ChannelType::Text)
            .topic(format!(
                "Ticket #{} | Created by {} | Type: {}",
                ticket_id,
                user.tag(),
                category_label
            ))
            .permissions(overwrites);
        if let Some(parent) = parent_category {
            builder = builder.category(ChannelId::new(parent));
        }

        let channel = guild_id.create_channel(http, builder).await?;

        let ticket = TicketRepository::new(self.db)
            .create(
                guild_id.get(),
                ticket_id,
                channel.id.get(),
                user.id.get(),
                category_label.to_string(),
            )
            .await?;

        let mut mentions = vec![format!("<@{}>", user.id)];
        mentions.extend(support_roles.iter().map(|role| format!("<@&{}>", role)));

        let embed = CreateEmbed::new()
            .colour(Colour::new(0x5865F2))
            .title(format!("🎫 Ticket #{}", ticket_id))
            .description(format!(
                "Hello <@{}>! Thank you for creating a ticket.\n\nPlease describe your issue and our support team will assist you shortly.",
                user.id
            ))
            .field("Category", category_label, true)
            .field("Status", "Open", true)
            .timestamp(Timestamp::now());

        let buttons = CreateActionRow::Buttons(vec![
            CreateButton::new("ticket_close")
                .label("Close Ticket")
                .style(ButtonStyle::Danger)
                .emoji('🔒'),
            CreateButton::new("ticket_claim")
                .label("Claim")
                .style(ButtonStyle::Primary)
                .emoji('✋'),
        ]);

        channel
            .send_message(
                http,
                CreateMessage::new()
                    .content(mentions.join(" "))
                    .embed(embed)
                    .components(vec![buttons]),
            )
            .await?;

        self.broadcaster
            .guild_update(guild_id.get(), GuildUpdateKind::TicketOpened);

        Ok(TicketOpen::Created {
            ticket,
            channel_id: channel.id,
        })
    }

    /// Closes a ticket and schedules the channel deletion.
    ///
    /// Idempotent: closing an already-closed ticket returns it unchanged and
    /// schedules nothing. The deletion is best-effort; a channel that is
    /// already gone only produces a log line.
    pub async fn close(
        &self,
        http: &Arc<Http>,
        guild_id: u64,
        ticket_id: i32,
        closed_by: &str,
    ) -> Result<Option<entity::ticket::Model>, AppError> {
        let repo = TicketRepository::new(self.db);

        let already_closed = matches!(
            repo.find_by_ticket_id(guild_id, ticket_id).await?,
            Some(ref ticket) if ticket.status == entity::ticket::TicketStatus::Closed
        );

        let transcript = format!("Ticket #{} closed by {}", ticket_id, closed_by);
        let Some(ticket) = repo.close(guild_id, ticket_id, Some(transcript)).await? else {
            return Ok(None);
        };

        if !already_closed {
            schedule_channel_delete(http.clone(), ticket.channel_id.clone());
            self.broadcaster
                .guild_update(guild_id, GuildUpdateKind::TicketClosed);
        }

        Ok(Some(ticket))
    }

    pub async fn find_by_channel(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::ticket::Model>, AppError> {
        Ok(TicketRepository::new(self.db)
            .find_by_channel(channel_id)
            .await?)
    }
}

/// Deletes the ticket channel after the announcement delay.
fn schedule_channel_delete(http: Arc<Http>, channel_id: String) {
    tokio::spawn(async move {
        tokio::time::sleep(CHANNEL_DELETE_DELAY).await;
        let Ok(id) = channel_id.parse::<u64>() else {
            tracing::warn!("Stored ticket channel id {} is not numeric", channel_id);
            return;
        };
        if let Err(err) = ChannelId::new(id).delete(&http).await {
            tracing::warn!("Ticket channel {} deletion failed: {}", id, err);
        }
    });
}

/// Channel name like `ticket-12-username`, sanitized to Discord's charset.
fn channel_name(ticket_id: i32, username: &str) -> String {
    let name = format!("ticket-{}-{}", ticket_id, username)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>();
    name.chars().take(100).collect()
}

/// Support role ids from the guild settings blob.
pub fn support_roles(settings: &serde_json::Value) -> Vec<u64> {
    settings
        .get("support_roles")
        .and_then(|value| value.as_array())
        .map(|roles| {
            roles
                .iter()
                .filter_map(|role| role.as_str())
                .filter_map(|role| role.parse::<u64>().ok())
                .collect()
        })
        .unwrap_or_default()
}
