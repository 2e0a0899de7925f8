//! Steward Test Utils
//!
//! Shared testing utilities for the steward workspace: a builder for test
//! contexts backed by in-memory SQLite databases, and factories that create
//! entities with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn works() -> Result<(), DbErr> {
//!     let test = TestBuilder::new()
//!         .with_table(entity::prelude::Guild)
//!         .build()
//!         .await
//!         .unwrap();
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
