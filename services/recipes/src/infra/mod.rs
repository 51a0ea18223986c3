pub mod db;
pub mod document;
pub mod edge;
pub mod recipe;
