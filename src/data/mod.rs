//! Database repository layer for all domain entities.
//!
//! Repository structs handle database operations (CRUD) for each domain in
//! the application. Repositories borrow the shared connection, use SeaORM
//! entity models and return `Result<_, DbErr>`; business rules live one
//! layer up in the services.

pub mod case;
pub mod conversation;
pub mod counter;
pub mod guild;
pub mod member;
pub mod scheduled_action;
pub mod sticky;
pub mod ticket;

#[cfg(test)]
mod test;
