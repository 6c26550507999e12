pub mod director;
pub mod genre;
pub mod movie;

/// Result of deleting a row that other rows may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
    /// Still referenced by this many movies; nothing was deleted.
    Referenced { movies: u64 },
}
