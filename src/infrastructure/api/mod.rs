//! Events API adapter.

mod client;
mod dto;

pub use client::EventsClient;
