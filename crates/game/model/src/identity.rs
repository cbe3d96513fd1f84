//! Identity generation for modifiers and items.

use uuid::Uuid;

/// Produces a fresh identifier each time it is called.
///
/// Structures that mint ids take one of these so tests can substitute a
/// deterministic sequence.
pub type IdSource = fn() -> String;

/// Returns a random (v4) UUID in canonical hyphenated lowercase form.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
