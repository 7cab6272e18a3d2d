//! Application layer use cases.
//!
//! - **`proxy_controller`** – status query, enable-with-verification (an
//!   explicit state machine with rollback) and best-effort disable.
//! - **`toggle_proxy`** – the top-level flow: resolve settings, read the
//!   current state, flip it, read it again and notify the user.

pub mod proxy_controller;
pub mod toggle_proxy;
