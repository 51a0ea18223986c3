//! User domain types.

/// Caller permission level injected by the gateway.
///
/// Carried as a `u8` in the role header: 0 = Normal, 1 = Service.
/// `Service` is reserved for trusted backends that provision accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Normal = 0,
    Service = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Normal),
            1 => Some(Self::Service),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}
