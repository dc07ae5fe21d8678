//! # shopfront-entity
//!
//! Domain entity models for Shopfront. Only the user record is modelled here;
//! shop and profile resources live outside the auth core.

pub mod user;
