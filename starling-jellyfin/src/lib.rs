//! A barebones client for the Jellyfin API, covering the music endpoints used by
//! the browsing views.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod item;
pub use item::*;

mod playlist;
pub use playlist::total_duration_seconds;

mod favorite;

mod request;
