//! # State Module
//!
//! Application state shared by the page components and the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppContext (lib.rs)                        │   │
//! │  │  config:  ConfigState                                           │   │
//! │  │  client:  Arc<QueryClient>                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ QueryClient  │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  per-id      │  │  Arc<Mutex<  │  │  api url         │              │
//! │  │  request     │  │    Cart      │  │  timeouts        │              │
//! │  │  cache       │  │  >>          │  │  currency        │              │
//! │  └──────────────┘  └──────┬───────┘  └──────────────────┘              │
//! │                           │                                             │
//! │                    CartProvider::mount()                               │
//! │                    use_cart_context()                                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • QueryClient: internal mutex around its entry map                    │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • CartProvider registry: thread-local (UI thread only)                │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{use_cart_context, CartActions, CartProvider, CartResponse, CartState};
pub use config::ConfigState;
