use crate::data::counter::CounterRepository;
use entity::guild_counter::CounterScope;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod concurrent;
mod next_id;
