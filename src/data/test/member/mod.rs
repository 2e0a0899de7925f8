use crate::data::member::MemberRepository;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod record_warning;
