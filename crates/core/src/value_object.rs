//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A `CalendarDate` or a `Weight` is a value object, a
//! `WeightEntry` is an entity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Constructors are expected to validate, so that holding a
/// value object is proof the value is well-formed.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Weight(f64);
///
/// impl ValueObject for Weight {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
