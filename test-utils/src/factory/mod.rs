//! Entity factories with sensible defaults, reducing boilerplate in tests.

pub mod guild;
pub mod helpers;
pub mod moderation_case;
pub mod scheduled_action;
pub mod sticky_message;
pub mod ticket;
