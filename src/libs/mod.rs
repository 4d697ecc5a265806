//! Domain logic and console plumbing.
//!
//! - **error**: [`error::BoardError`], the typed failure of every board operation
//! - **scope**: ownership gate (`assert_owned`)
//! - **ordering**: reposition planning and its transactional application
//! - **task_service**: create, move, edit and delete tasks
//! - **account**: signup with the default board
//! - **config**, **data_storage**: settings file and its location
//! - **messages**, **view**: console output

pub mod account;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod ordering;
pub mod scope;
pub mod task;
pub mod task_service;
pub mod view;
