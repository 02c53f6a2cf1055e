//! Clock port.

use crate::domain::foundation::Timestamp;

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
