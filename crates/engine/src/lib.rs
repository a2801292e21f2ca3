//! Creature engine library.
//!
//! Server-side code for the creature record and dice service.
//!
//! ## Structure
//!
//! - `repositories/` - Bounded wrappers around the storage and random ports
//! - `use_cases/` - Creature lifecycle, cascading writes and dice rolls
//! - `infrastructure/` - Port traits, configuration and store adapters
//! - `stores/` - In-process coordination state
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod stores;
pub mod use_cases;

pub use app::App;
