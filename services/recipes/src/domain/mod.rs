pub mod edge;
pub mod repository;
pub mod types;
pub mod viewer;
