//! Typed VGS resource endpoints layered over the [`Client`](crate::client::Client) facade.
//!
//! Each endpoint issues exactly one `GET` or `POST` against a fixed path. List endpoints return a
//! [`Page`](crate::client::Page) whose pagination metadata is exposed but never followed.

pub mod common;
pub mod financial_instruments;
pub mod gateways;
pub mod verifications;

pub use common::*;
pub use financial_instruments::*;
pub use gateways::*;
pub use verifications::*;
