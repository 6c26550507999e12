pub use super::directors::Entity as Directors;
pub use super::genres::Entity as Genres;
pub use super::movies::Entity as Movies;
