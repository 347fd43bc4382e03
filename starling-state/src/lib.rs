//! The data model behind starling's list views: rows, selection, sorting,
//! column layouts, playback filters and the play queue.
//!
//! Everything here is plain data with no I/O, so it can be driven and tested
//! without a server.
#![deny(missing_docs)]

pub use starling_jellyfin as jf;
pub use starling_subsonic as bs;

mod ids;
pub use ids::{ItemId, UniqueId};

mod track;
pub use track::Track;

mod album;
pub use album::Album;

mod artist;
pub use artist::Artist;

mod playlist;
pub use playlist::Playlist;

mod row;
pub use row::{Row, RowKind, RowKindTag, SortValue};

pub mod column;
pub use column::{ColumnDescriptor, ColumnKey, ListType};

pub mod sort;
pub use sort::{SortContext, SortDirection, SortField, SortRegistry, SortSpec};

pub mod selection;
pub use selection::SelectionState;

pub mod filter;
pub use filter::PlaybackFilter;

pub mod play_queue;
pub use play_queue::{PlayFromHere, PlayQueue, PlayerStatus};
