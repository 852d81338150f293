//! Record tools module.
//!
//! This module provides the CRUD tools operating on Supabase tables:
//! - `read`: fetch records with filtering, sorting, and pagination
//! - `create`: insert one record or a batch in a single call
//! - `update`: modify the records matching a filter map
//! - `delete`: remove the records matching a filter map
//!
//! Shared argument validation and result helpers live in `common`.

pub mod common;
pub mod create;
pub mod delete;
pub mod read;
pub mod update;

pub use create::{CreateRecordsParams, CreateRecordsTool, RecordsArg};
pub use delete::{DeleteRecordsParams, DeleteRecordsTool};
pub use read::{ReadRecordsParams, ReadRecordsTool};
pub use update::{UpdateRecordsParams, UpdateRecordsTool};
