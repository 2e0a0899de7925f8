use crate::data::{case::CaseRepository, counter::CounterRepository};
use entity::guild_counter::CounterScope;
use entity::moderation_case::CaseKind;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::moderation_case::CaseFactory};

mod create;
mod deactivate;
mod list;
