//! Booking directory core: venues, artists and the shows that link them.
//!
//! Every operation takes the database handle explicitly and returns plain
//! serializable data. Mutations report a [`MutationOutcome`] instead of an
//! error so callers can show the message as-is.

pub mod artists;
pub mod classify;
pub mod directory;
pub mod error;
pub mod form;
pub mod mutation;
pub mod search;
pub mod shows;
pub mod venues;

#[cfg(test)]
pub(crate) mod test_support;

pub use classify::{classify, format_start_time, ClassifiedShows};
pub use directory::{venue_directory, AreaGroup};
pub use error::BookingError;
pub use form::FormFields;
pub use mutation::{commit_or_rollback, MutationOutcome};
pub use search::{search_artists, search_venues, NameRef, SearchResults, VenueSearch};
