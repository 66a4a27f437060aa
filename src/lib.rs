//! Letterdrop - Mailing-list subscription service
//!
//! This crate implements a double-opt-in subscription workflow: a signup
//! records a pending subscriber with a single-use confirmation token, a
//! confirmation email carries the verification link, and visiting the link
//! with a valid unexpired token activates the subscription.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
