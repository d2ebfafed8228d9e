//! Mail transport implementations
//!
//! - **SMTP**: deliver through an SMTP server with `AUTH PLAIN` (production)

pub mod smtp;
