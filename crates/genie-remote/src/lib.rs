//! Remote platform access.
//!
//! Every platform interaction goes through [`RemoteClient`]: fetch an entity,
//! store a new one, or query a table. Calls are blocking and fallible; no
//! retry is attempted here.
//!
//! [`LocalStore`] implements the client over a JSON document on disk so runs
//! can be performed offline and integration tests have a real platform to
//! talk to.

pub mod client;
pub mod hash;
pub mod local;
pub mod query;

pub use client::{RemoteClient, RemoteError};
pub use local::LocalStore;
pub use query::{TableQuery, select_all};
