//! vantage-http - Network implementation of the Vantage analytics client.
//!
//! Builds on [`vantage_core`]: the [`Dispatcher`] is the single choke
//! point through which every backend call passes (bearer attachment,
//! 401 invalidation), the [`SessionController`] runs the login/logout
//! lifecycle, and [`endpoints`] holds one data-access function per
//! backend endpoint.

mod client;
mod dispatcher;
pub mod endpoints;
mod session;

pub use dispatcher::{Dispatcher, InvalidationHook, NoopHook};
pub use session::{SessionController, SessionState};
