use std::fmt;
use uuid::Uuid;

/// Unique identifier assigned to every constructed device.
///
/// Two devices built from identical arguments still carry different ids,
/// which is how callers can tell that handles are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Generate a new unique device ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell devices apart in logs.
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}
