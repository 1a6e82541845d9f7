//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Weight entries are entities: two entries with the same date and weight are
/// still distinct records (a re-entry or correction), told apart by id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
