//! Server-owned records.

/// A record the server created and identifies.
///
/// The id is assigned remotely and never changes; the client only echoes it
/// back on update and delete.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
