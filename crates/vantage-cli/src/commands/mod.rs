//! Command implementations.

pub mod activity;
pub mod anomalies;
pub mod chart_data;
pub mod features;
pub mod insights;
pub mod login;
pub mod logout;
pub mod summary;
pub mod whoami;
