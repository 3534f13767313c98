//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two instances
/// with the same attributes are the same value. `Money { 100, "USD" }` is a
/// value object; an `Order` (identified by its id) is not.
///
/// To "modify" a value object, construct a new one. Requiring `Clone +
/// PartialEq + Debug` keeps them cheap to copy, comparable and loggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
