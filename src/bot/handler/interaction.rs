//! Message-component routing: the ticket panel (open buttons / select) and
//! the in-channel ticket close/claim buttons.

use serenity::all::{
    Colour, ComponentInteraction, ComponentInteractionDataKind, Context, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    Permissions, Timestamp,
};

use crate::{
    bot::handler::Handler,
    data::guild::GuildRepository,
    error::AppError,
    service::ticket::{support_roles, TicketOpen, TicketService},
};

pub(super) async fn handle_component(
    handler: &Handler,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let custom_id = component.data.custom_id.clone();

    let result = if let Some(index) = custom_id.strip_prefix("ticket_create_") {
        let index = index.parse::<usize>().unwrap_or(0);
        open_ticket(handler, ctx, &component, index).await
    } else if custom_id == "ticket_select" {
        let index = match &component.data.kind {
            ComponentInteractionDataKind::StringSelect { values } => values
                .first()
                .and_then(|value| value.strip_prefix("ticket_create_"))
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0),
            _ => 0,
        };
        open_ticket(handler, ctx, &component, index).await
    } else if custom_id == "ticket_close" {
        close_ticket(handler, ctx, &component).await
    } else if custom_id == "ticket_claim" {
        claim_ticket(handler, ctx, &component).await
    } else {
        Ok(())
    };

    if let Err(err) = result {
        tracing::error!("Component interaction error [{}]: {}", custom_id, err);
        let notice = CreateInteractionResponseMessage::new()
            .content("❌ An error occurred!")
            .ephemeral(true);
        if component
            .create_response(&ctx.http, CreateInteractionResponse::Message(notice))
            .await
            .is_err()
        {
            let followup = EditInteractionResponse::new().content("❌ An error occurred!");
            if let Err(err) = component.edit_response(&ctx.http, followup).await {
                tracing::warn!("Failed to deliver component failure notice: {}", err);
            }
        }
    }
}

/// Opens a ticket of the panel type at `index` for the interacting user.
async fn open_ticket(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    index: usize,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let category_label = GuildRepository::new(&handler.services.db)
        .find_by_guild_id(guild_id.get())
        .await?
        .and_then(|guild| ticket_type_label(&guild.settings, index))
        .unwrap_or_else(|| "Support".to_string());

    let bot_id = ctx.cache.current_user().id;
    let opened = TicketService::new(&handler.services.db, &handler.services.broadcaster)
        .open(&ctx.http, guild_id, bot_id, &component.user, &category_label)
        .await?;

    let content = match opened {
        TicketOpen::Created { channel_id, .. } => {
            format!("✅ Ticket created! <#{}>", channel_id)
        }
        TicketOpen::AlreadyOpen { channel_id } => {
            format!("❌ You already have an open ticket! <#{}>", channel_id)
        }
    };

    component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}

/// Closes the ticket owning this channel and announces the pending channel
/// deletion.
async fn close_ticket(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };

    let service = TicketService::new(&handler.services.db, &handler.services.broadcaster);
    let Some(ticket) = service.find_by_channel(component.channel_id.get()).await? else {
        let notice = CreateInteractionResponseMessage::new()
            .content("❌ Invalid ticket channel!")
            .ephemeral(true);
        component
            .create_response(&ctx.http, CreateInteractionResponse::Message(notice))
            .await?;
        return Ok(());
    };

    component.defer(&ctx.http).await?;

    service
        .close(
            &ctx.http,
            guild_id.get(),
            ticket.ticket_id,
            &component.user.tag(),
        )
        .await?;

    let embed = CreateEmbed::new()
        .colour(Colour::new(0xED4245))
        .title("🔒 Ticket Closed")
        .description(format!(
            "This ticket has been closed by <@{}>\n\nThis channel will be deleted in 5 seconds.",
            component.user.id
        ))
        .timestamp(Timestamp::now());

    component
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;

    Ok(())
}

/// Marks the ticket as claimed by a support member.
async fn claim_ticket(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };

    let allowed_roles = GuildRepository::new(&handler.services.db)
        .find_by_guild_id(guild_id.get())
        .await?
        .map(|guild| support_roles(&guild.settings))
        .unwrap_or_default();

    let authorized = component
        .member
        .as_ref()
        .map(|member| {
            let has_role = member
                .roles
                .iter()
                .any(|role| allowed_roles.contains(&role.get()));
            let can_manage = member
                .permissions
                .unwrap_or_default()
                .contains(Permissions::MANAGE_CHANNELS);
            has_role || can_manage
        })
        .unwrap_or(false);

    if !authorized {
        let notice = CreateInteractionResponseMessage::new()
            .content("❌ You do not have permission to claim tickets!")
            .ephemeral(true);
        component
            .create_response(&ctx.http, CreateInteractionResponse::Message(notice))
            .await?;
        return Ok(());
    }

    let embed = CreateEmbed::new()
        .colour(Colour::new(0x3BA55C))
        .description(format!(
            "✋ This ticket has been claimed by <@{}>",
            component.user.id
        ))
        .timestamp(Timestamp::now());

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            ),
        )
        .await?;

    Ok(())
}

/// Label of the panel ticket type at `index`, falling back to the first.
fn ticket_type_label(settings: &serde_json::Value, index: usize) -> Option<String> {
    let types = settings.get("ticket_types")?.as_array()?;
    let ticket_type = types.get(index).or_else(|| types.first())?;
    ticket_type
        .get("label")
        .and_then(|label| label.as_str())
        .map(|label| label.to_string())
}
