//! Menu tree and the screen state machine that walks it.
//!
//! A [`MenuNode`] tree is built once (see `catalog.rs`) and only ever
//! borrowed. A single [`MenuScreen`] plays every level of the tree in turn:
//! choosing a group swaps its children in, choosing an action runs the
//! caller's handler and drops back to the top level.
//!
//! Pagination is derived from the focus on every render, see [`layout`].

pub mod layout;
mod node;
mod screen;

pub use node::MenuNode;
pub use screen::{MenuScreen, Selection};
