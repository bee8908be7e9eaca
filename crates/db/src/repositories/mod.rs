//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations that touch several
//! rows run inside a single transaction.

pub mod artist_repo;
pub mod chart_repo;
pub mod list_entry_repo;
pub mod mix_repo;
pub mod track_repo;
pub mod user_repo;

pub use artist_repo::ArtistRepo;
pub use chart_repo::ChartRepo;
pub use list_entry_repo::ListEntryRepo;
pub use mix_repo::MixRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
