mod case;
mod conversation;
mod counter;
mod guild;
mod member;
mod scheduled_action;
mod sticky;
mod ticket;
