//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │   AppContext             │      │   QuoteSession               │    │
//! │  │                          │      │                              │    │
//! │  │   AppConfig              │ ───► │   Arc<Catalog> (snapshot)    │    │
//! │  │   Database (pool)        │      │   SelectionState (draft)     │    │
//! │  │                          │      │   QuoteView (last price)     │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  The context lives for one CLI invocation. A session never touches     │
//! │  the database: it prices against the snapshot it was given.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod context;
mod session;

pub use context::AppContext;
pub use session::QuoteSession;
