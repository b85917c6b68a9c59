//! # Clientele Architecture
//!
//! Clientele is a **UI-agnostic record-keeping library**: the CLI binary is a
//! thin client over it, and any other front end could drive the same core.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, binary only)                 │
//! │  - Parses arguments, formats output, handles exit codes     │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Manager Layer (manager.rs)                                 │
//! │  - CRUD + stats over an in-memory cache                     │
//! │  - Enforces uniqueness and existence invariants             │
//! │  - Returns structured Result types, never prints            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract RecordStore trait                               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The normalized-name key
//!
//! Every record is keyed by a canonical ASCII form of the client's display
//! name ([`normalize::normalize_name`]): `"Ana López"` and `"ana lopez"` are
//! the same client. The key names the backing file, indexes the cache, and
//! carries the uniqueness invariant: at most one record exists per key.
//!
//! ## Module Overview
//!
//! - [`manager`]: The record manager, entry point for all operations
//! - [`model`]: Core data types (`Client`, `Service`) and the text format
//! - [`store`]: Storage abstraction and implementations
//! - [`normalize`]: Display name → storage key
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod normalize;
pub mod store;
