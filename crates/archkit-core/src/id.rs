//! Entity id generation
//!
//! Diagram entity ids are plain strings so that drag payload ids
//! (`"{base}-{timestamp}"`) can flow into node ids unchanged. Entities
//! created programmatically get a UUID v4 string from here.

use uuid::Uuid;

/// Generate a fresh unique entity id
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
