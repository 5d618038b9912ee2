//! # Async Tasks
//!
//! Background work spawned on behalf of the event loop. Tasks never touch provider
//! state; they report back through [`PanelEvent`](crate::app::events::PanelEvent).

pub mod confirmation;
