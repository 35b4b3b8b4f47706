//! Persistent store for x-ui.
//!
//! Owns the on-disk SQLite database holding three entities:
//!
//! - [`User`] - panel accounts; one default administrator is seeded on first start
//! - [`Inbound`] - proxy ingress definitions plus cumulative traffic counters
//! - [`Setting`] - free-form key/value pairs
//!
//! Schemas are explicit, versioned step lists (see [`schema`]) applied by
//! [`Store::migrate`]. A [`Store`] is cheap to clone and safe to share between
//! the traffic scheduler and admin handlers.
//!
//! # Example
//!
//! ```no_run
//! use xui_database::{Store, StoreOptions};
//!
//! # async fn example() -> Result<(), xui_database::StoreError> {
//! let store = Store::open("/etc/x-ui/x-ui.db", StoreOptions::default()).await?;
//! store.bootstrap().await?;
//! let inbounds = store.list_inbounds().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod inbounds;
mod model;
mod queries;
pub mod schema;
mod settings;
mod store;
mod users;


pub use error::StoreError;
pub use model::{Inbound, InboundConfig, NewInbound, Setting, User};
pub use schema::EntitySchema;
pub use store::{Store, StoreOptions};
