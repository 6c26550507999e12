pub mod director;
pub mod genre;
pub mod movie;

pub use director::{DirectorUpdate, NewDirector};
pub use genre::{GenreUpdate, NewGenre};
pub use movie::{MovieUpdate, NewMovie};
