pub mod database;
pub mod form;
