use crate::data::scheduled_action::ScheduledActionRepository;
use chrono::{Duration, Utc};
use entity::scheduled_action::ScheduledActionKind;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::scheduled_action::ScheduledActionFactory};

mod due;
