//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values.
/// A validated set of customer fields is a value object; the stored customer
/// record, which keeps its id across updates, is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
