//! Device location collaborator.
//!
//! Platform permission dialogs and positioning live behind this trait;
//! the dashboard only sees a permission answer and a coordinate.

use async_trait::async_trait;

use crate::types::{Coordinate, LocationError};

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[async_trait]
pub trait LocationService {
    /// Ask the platform for permission to read the device position.
    async fn request_permission(&self) -> Permission;

    /// Current device coordinate. Callers must hold a granted permission.
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_equality() {
        assert_eq!(Permission::Granted, Permission::Granted);
        assert_ne!(Permission::Granted, Permission::Denied);
    }
}
