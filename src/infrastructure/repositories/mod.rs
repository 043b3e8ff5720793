//! Repository implementations using SeaORM

pub mod glossary_repository;

pub use glossary_repository::SeaOrmGlossaryRepository;
