//! Card Services - management of payment card records
//!
//! Create, read, update, delete, activate and deactivate cards owned by
//! users, with input validation and typed errors that map cleanly onto
//! HTTP-style status codes.
//!
//! # Architecture
//!
//! - `models`: Card, request payload, IDs, money and expiry types
//! - `storage`: the `CardStore` trait with in-memory and JSON backings
//! - `services`: validation and business rules
//! - `api`: status/body mapping for a request/response boundary
//! - `audit`: append-only log of every mutation
//! - `config`: paths and settings
//! - `display` / `cli`: terminal front end
//!
//! # Example
//!
//! ```
//! use card_services::models::{CardRequest, UserId};
//! use card_services::services::CardService;
//! use card_services::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let service = CardService::new(&storage);
//!
//! let request = CardRequest::new("4111111111111111", "09/27", "A B", UserId::new());
//! let card = service.create(Some(&request)).unwrap();
//! assert_eq!(card.card_type, "Default");
//! assert!(service.activate(card.id).unwrap().is_active);
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CardError, CardResult, ErrorKind};
