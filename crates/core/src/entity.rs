//! Entities: domain objects tracked by identity rather than by value.

/// Something with a stable identity that outlives its state.
///
/// A stock item's quality and sell-by counter change every tick; two
/// snapshots of it are still the same item.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// True when `other` is a snapshot of the same entity, whatever its state.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
