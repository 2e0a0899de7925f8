use crate::data::sticky::StickyRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::sticky_message::StickyFactory};

mod upsert;
