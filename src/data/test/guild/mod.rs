use crate::data::guild::GuildRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::guild::GuildFactory};

mod toggle_module;
mod upsert;
