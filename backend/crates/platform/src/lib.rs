//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) and random credential generation
//! - Random verification codes and nicknames
//! - Refresh-token cookie construction
//! - Outbound mail delivery

pub mod cookie;
pub mod crypto;
pub mod mail;
pub mod password;
