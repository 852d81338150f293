//! Supabase gateway module.
//!
//! This module wraps the Supabase REST (PostgREST) API behind a small
//! blocking client:
//!
//! - `client`: the [`SupabaseClient`] executing read/create/update/delete
//!   requests against the remote service
//! - `query`: ordered construction of PostgREST query parameters
//! - `filter`: filter map parsing and operator rendering
//! - `error`: gateway error types
//!
//! Every call is independent and stateless; the only state carried between
//! calls is the credential and the HTTP client handle.

pub mod client;
pub mod error;
pub mod filter;
pub mod query;

pub use client::{Row, SupabaseClient};
pub use error::SupabaseError;
pub use filter::{FilterClause, FilterOp, parse_filters};
pub use query::TableQuery;
