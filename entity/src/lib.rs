//! SeaORM entity definitions for the steward database.

pub mod ai_conversation;
pub mod guild;
pub mod guild_counter;
pub mod member;
pub mod moderation_case;
pub mod scheduled_action;
pub mod sticky_message;
pub mod ticket;

pub mod prelude {
    pub use super::ai_conversation::Entity as AiConversation;
    pub use super::guild::Entity as Guild;
    pub use super::guild_counter::Entity as GuildCounter;
    pub use super::member::Entity as Member;
    pub use super::moderation_case::Entity as ModerationCase;
    pub use super::scheduled_action::Entity as ScheduledAction;
    pub use super::sticky_message::Entity as StickyMessage;
    pub use super::ticket::Entity as Ticket;
}
