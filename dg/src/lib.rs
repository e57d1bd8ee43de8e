//! DummyGen - schema builder and client for a mock data generation service
//!
//! A user assembles an ordered list of named, typed fields, previews a small
//! generated sample and downloads a full dataset as JSON or CSV. Schema rules
//! (uniqueness, alias resolution, request normalization) live in
//! [`fieldkit`]; this crate adds the service client, persistence and the CLI.
//!
//! # Modules
//!
//! - [`client`] - generation service trait and HTTP implementation
//! - [`session`] - schema session with request sequencing
//! - [`store`] - on-disk schema and catalog cache
//! - [`output`] - terminal rendering and output files
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod output;
pub mod session;
pub mod store;

pub use client::{ClientError, GenerationClient, GenerationOutput, HttpGenerationClient};
pub use config::Config;
pub use session::{RequestSequencer, RequestTicket, Session, SessionError};
pub use store::{SchemaStore, StoreError};
