use crate::data::ticket::TicketRepository;
use entity::ticket::TicketStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::ticket::TicketFactory};

mod close;
mod find;
