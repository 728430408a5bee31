//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod address_service;
pub mod catalog_service;
pub mod history_service;
pub mod homepage_service;
pub mod user_service;

#[cfg(test)]
mod fakes;
