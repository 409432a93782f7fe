//! Cabin trip coordination backend.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and services;
//! `inbound::http` adapts them to Actix handlers; `outbound::persistence`
//! implements the driven ports over PostgreSQL; `server` wires everything
//! together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
