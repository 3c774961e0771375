//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters, usually a
//! descriptor from `core::projection`:
//! - `TitleBar`: Top status bar showing seed origin and status
//! - `Greeting`: One greeting row
//! - `CounterButton`: The click counter
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `GreetingList`: Scrollable row container with cursor and layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components never reach into the store. They draw descriptors and report
//! positions; the event loop turns positions back into the descriptor's
//! bound intent:
//!
//! ```rust,ignore
//! // Good: the gesture goes through the descriptor's binding
//! let intent = projection.row(pos).map(|row| row.on_activate);
//!
//! // Bad: the view mutating store state directly
//! store.toggle_item(ItemId(pos as u32));
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── greeting.rs        (Single row renderer)
//! ├── greeting_list.rs   (Scrollable row container)
//! └── counter_button.rs  (Click counter)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod counter_button;
pub mod greeting;
pub mod greeting_list;
pub use counter_button::CounterButton;
pub use greeting::Greeting;
pub use greeting_list::{GreetingList, GreetingListState, ListEvent};
