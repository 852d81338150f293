//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod records;

pub use records::{
    CreateRecordsParams, CreateRecordsTool, DeleteRecordsParams, DeleteRecordsTool,
    ReadRecordsParams, ReadRecordsTool, RecordsArg, UpdateRecordsParams, UpdateRecordsTool,
};
