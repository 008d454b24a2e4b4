//! # ArchKit Core
//!
//! Core types, traits, and utilities for ArchKit.
//! Provides the geometry primitives shared by every layer, the error
//! taxonomy for the diagram engine, and the host-collaborator traits
//! (key-value store, analytics, notifications) that the engine calls
//! but never owns the implementation of.

pub mod error;
pub mod geometry;
pub mod host;
pub mod id;

pub use error::{DragPayloadError, Error, GeometryError, Result, ValidationError};

pub use geometry::{Point, Rect, Size};

pub use host::{
    AnalyticsEvent, AnalyticsReporter, KeyValueStore, LogNotifier, MemoryStore, NotificationKind,
    NotificationSink, NullReporter,
};
