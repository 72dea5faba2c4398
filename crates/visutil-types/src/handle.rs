use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque value owned by the host environment.
///
/// Handles stand in for things such as UI elements that the merge engine
/// must pass through untouched: they are never merged into, never bridged,
/// and two handles are equal only if they point at the same allocation.
#[derive(Clone)]
pub struct Handle {
    label: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Handle {
    /// Wrap a host value under a descriptive label.
    pub fn new<T: Any + Send + Sync>(label: impl Into<String>, value: T) -> Self {
        Self {
            label: Arc::from(label.into()),
            inner: Arc::new(value),
        }
    }

    /// The label given at construction, used for display and JSON output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns `true` if both handles wrap the same host value.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.label)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_equal() {
        let h = Handle::new("canvas", 7u32);
        let copy = h.clone();
        assert_eq!(h, copy);
        assert!(h.ptr_eq(&copy));
    }

    #[test]
    fn same_payload_different_allocation_not_equal() {
        let a = Handle::new("div", 1u8);
        let b = Handle::new("div", 1u8);
        assert_ne!(a, b);
    }

    #[test]
    fn downcast() {
        let h = Handle::new("element", String::from("#graph"));
        assert_eq!(h.downcast_ref::<String>().map(String::as_str), Some("#graph"));
        assert!(h.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn display_uses_label() {
        let h = Handle::new("container", ());
        assert_eq!(format!("{h}"), "container");
        assert_eq!(format!("{h:?}"), "Handle(container)");
    }
}
