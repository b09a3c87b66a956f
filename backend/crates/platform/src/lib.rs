//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Cookie building and parsing
//! - Random secrets and Base64
//! - Client address resolution
//! - Attempt throttling

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
