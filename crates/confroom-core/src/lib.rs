//! confroom-core — room session client for managed real-time video rooms.
//!
//! # Architecture (Clean Architecture)
//!
//! - **domain**: identifiers, connection state, media handles, access claims (no I/O).
//! - **application**: use cases, port traits, the room session controller and
//!   pure view construction.
//! - **adapters**: JWT signing (jsonwebtoken), recording HTTP client (reqwest),
//!   loopback room SDK, in-memory surfaces, HTML rendering.
//! - **bootstrap**: builds the shared application context from configuration.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod error;
