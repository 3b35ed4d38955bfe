pub mod app_data;
pub mod collection;
pub mod species;
