//! A barebones client for the Subsonic API, covering the endpoints used by the
//! browsing views: albums, artists, playlists, annotations and downloads.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod album;
pub use album::*;

mod artist;
pub use artist::*;

mod song;
pub use song::*;

mod playlist;
pub use playlist::*;

mod annotation;

mod misc;

mod request;
