use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serenity::all::{ChannelId, Colour, CreateEmbed, CreateMessage, Member, Mentionable, Timestamp};
use serenity::http::Http;

use crate::{data::guild::GuildRepository, dispatch::ModuleCategory, error::AppError};

/// Stored welcome embed shape, as edited on the dashboard.
#[derive(Debug, Deserialize)]
struct WelcomeEmbed {
    title: Option<String>,
    description: Option<String>,
    /// Hex color like `#5865F2`.
    color: Option<String>,
}

/// Greets joining members according to the guild's welcome configuration.
pub struct WelcomeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends the welcome message for a new member, if the guild has the
    /// welcome module enabled and a channel configured. Never propagates
    /// failures into the join event.
    pub async fn handle_member_join(
        &self,
        http: &Http,
        member: &Member,
        guild_name: &str,
        member_count: u64,
    ) -> Result<(), AppError> {
        let Some(guild) = GuildRepository::new(self.db)
            .find_by_guild_id(member.guild_id.get())
            .await?
        else {
            return Ok(());
        };

        let enabled = guild
            .modules_enabled
            .get(ModuleCategory::Welcome.key())
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if !enabled {
            return Ok(());
        }

        let Some(channel) = guild
            .welcome_channel
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
        else {
            return Ok(());
        };
        let channel = ChannelId::new(channel);

        let render = |text: &str| {
            render_placeholders(
                text,
                &member.mention().to_string(),
                &member.user.name,
                guild_name,
                member_count,
            )
        };

        let message = if let Some(stored) = &guild.welcome_embed {
            let stored: WelcomeEmbed = serde_json::from_value(stored.clone())?;
            let mut embed = CreateEmbed::new().timestamp(Timestamp::now());
            if let Some(title) = &stored.title {
                embed = embed.title(render(title));
            }
            if let Some(description) = &stored.description {
                embed = embed.description(render(description));
            }
            embed = embed.colour(parse_colour(stored.color.as_deref()));
            CreateMessage::new().embed(embed)
        } else if let Some(text) = &guild.welcome_message {
            CreateMessage::new().content(render(text))
        } else {
            let embed = CreateEmbed::new()
                .colour(Colour::new(0x5865F2))
                .title("👋 Welcome!")
                .description(format!(
                    "Welcome to **{}**, {}!",
                    guild_name,
                    member.mention()
                ))
                .thumbnail(member.user.face())
                .footer(serenity::all::CreateEmbedFooter::new(format!(
                    "Member #{}",
                    member_count
                )))
                .timestamp(Timestamp::now());
            CreateMessage::new().embed(embed)
        };

        channel.send_message(http, message).await?;
        Ok(())
    }
}

/// Substitutes the supported `{placeholder}` tokens in welcome text.
pub fn render_placeholders(
    text: &str,
    mention: &str,
    username: &str,
    guild_name: &str,
    member_count: u64,
) -> String {
    text.replace("{user}", mention)
        .replace("{mention}", mention)
        .replace("{username}", username)
        .replace("{server}", guild_name)
        .replace("{membercount}", &member_count.to_string())
}

fn parse_colour(hex: Option<&str>) -> Colour {
    hex.and_then(|hex| u32::from_str_radix(hex.trim_start_matches('#'), 16).ok())
        .map(Colour::new)
        .unwrap_or(Colour::new(0x5865F2))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replaces_every_placeholder() {
        let rendered = render_placeholders(
            "Hi {user} aka {username}, welcome to {server} ({membercount})",
            "<@1>",
            "tester",
            "Test Guild",
            42,
        );
        assert_eq!(rendered, "Hi <@1> aka tester, welcome to Test Guild (42)");
    }

    #[test]
    fn parses_hex_colour_with_hash() {
        assert_eq!(parse_colour(Some("#ED4245")).0, 0xED4245);
        assert_eq!(parse_colour(Some("bad")).0, 0x5865F2);
        assert_eq!(parse_colour(None).0, 0x5865F2);
    }
}
