//! # Core Application Logic
//!
//! This module contains greetlist's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ItemStore (state)    │
//!                    │  • Projection (views)   │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No terminal. Pure.     │
//!                    └───────────┬─────────────┘
//!                                │ descriptors ▲ intents
//!                                ▼             │
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: `ItemStore`: items, counter, observers
//! - [`projection`]: descriptors, intents, keyed row cache
//! - [`state`]: the `App` struct
//! - [`action`]: the `Action` enum and `update()`
//! - [`seed`]: where the initial labels come from
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod projection;
pub mod seed;
pub mod state;
pub mod store;
