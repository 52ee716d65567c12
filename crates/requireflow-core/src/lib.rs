//! RequireFlow Core Library
//!
//! Domain models and store operations for customer-raised requirements,
//! the customers that raise them, and the statistics derived from both.

pub mod customer;
pub mod dashboard;
pub mod error;
pub mod requirement;
pub mod seed;
pub mod user;
pub mod workspace;

pub use error::{CoreError, CoreResult};
pub use workspace::Workspace;
