use crate::data::conversation::ConversationRepository;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod save;
