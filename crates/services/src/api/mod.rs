mod client;
mod events;
pub(crate) mod wire;

pub use client::ApiClient;
pub use events::{AuthEvent, AuthEvents};
