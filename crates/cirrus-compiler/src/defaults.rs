//! Layered default resolution.
//!
//! Each overridable property is resolved from three layers, highest first:
//! the function's own value, the provider-wide default, and a hard-coded
//! fallback. The first *truthy* layer wins, so `memorySize: 0` or
//! `timeout: ""` behave as if they were not set at all. Callers relying on a
//! literal zero or empty string cannot express it; this matches how the
//! service files have always been interpreted.

/// Fallback memory size in MB.
pub const DEFAULT_MEMORY_MB: u32 = 256;

/// Fallback region.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Fallback runtime.
pub const DEFAULT_RUNTIME: &str = "nodejs8";

/// Fallback timeout.
pub const DEFAULT_TIMEOUT: &str = "60s";

/// Values that can be "unset" without being absent.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for u32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// Return the first truthy value of `overridden`, `provider`, `fallback`.
///
/// The fallback is returned as-is even when it is itself falsy.
pub fn resolve<T>(overridden: Option<&T>, provider: Option<&T>, fallback: &T) -> T::Owned
where
    T: Truthy + ToOwned + ?Sized,
{
    [overridden, provider]
        .into_iter()
        .flatten()
        .find(|value| value.is_truthy())
        .unwrap_or(fallback)
        .to_owned()
}
