#![forbid(unsafe_code)]

//! Undo/redo history for edited documents.
//!
//! This module provides the snapshot history that backs the editor's undo
//! and redo. It implements linear history with branch discard:
//!
//! - **Snapshots**: every step is a whole value, shared through `Arc`
//! - **Live updates**: the present can change without creating a step
//! - **Branch discard**: any new committed step erases the redo stack
//! - **Bounded depth**: an optional cap evicts the oldest steps
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        HistoryState                             │
//! │  ┌──────────────────┐                ┌──────────────────┐       │
//! │  │      Past        │    undo()      │     Future       │       │
//! │  │  (oldest first)  │  ──────────►   │ (nearest first)  │       │
//! │  │                  │   ◄──────────  │                  │       │
//! │  └──────────────────┘    redo()      └──────────────────┘       │
//! │                     Present (+ anchor while live)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`history`]: [`HistoryState`] and its configuration
//!
//! Deciding *when* an edit becomes a step is the job of
//! [`CommitCoalescer`](crate::coalesce::CommitCoalescer), not of the history.

pub mod history;

pub use history::{HistoryConfig, HistoryState};
