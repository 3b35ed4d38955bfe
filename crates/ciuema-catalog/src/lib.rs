pub mod catalog;
pub mod image;
pub mod repository;
pub mod search;
pub mod session;

pub use catalog::Catalog;
pub use repository::CollectionPatch;
