//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// Degradation policies are value objects: two policies with the same
/// configured amounts behave identically for every item.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct DegradationPolicy {
///     standard_degradation_amount: i64,
/// }
///
/// impl ValueObject for DegradationPolicy {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
