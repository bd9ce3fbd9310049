//! Registration wizard engine for the allied and healthcare professions
//! portal.
//!
//! Pure domain logic: form schemas, the wizard controller, step validation,
//! attachment policy and draft persistence. No I/O beyond the draft storage
//! backend the caller hands in.

pub mod attachment;
pub mod config;
pub mod draft;
pub mod error;
pub mod fee;
pub mod field_path;
pub mod forms;
pub mod profession;
pub mod registration;
pub mod routes;
pub mod schema;
pub mod storage;
pub mod types;
pub mod validation;
pub mod wizard;
