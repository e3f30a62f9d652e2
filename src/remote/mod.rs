//! Remote moment tensor lookup by event ID.

mod comcat;
mod config;

pub use comcat::{parse_event_detail, ComcatClient, RemoteEvent, RemoteFetchError};
pub use config::RemoteConfig;
