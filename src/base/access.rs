use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    Read,
    Write,
}

impl AccessType {
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    pub fn short(self) -> &'static str {
        match self {
            Self::Read => "R",
            Self::Write => "W",
        }
    }
}

/// One trace entry: an access type and a 32-bit byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub access: AccessType,
    pub addr: u32,
}

impl AccessRecord {
    pub fn read(addr: u32) -> Self {
        Self {
            access: AccessType::Read,
            addr,
        }
    }

    pub fn write(addr: u32) -> Self {
        Self {
            access: AccessType::Write,
            addr,
        }
    }

    pub fn is_write(&self) -> bool {
        self.access.is_write()
    }
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#010x}", self.access.short(), self.addr)
    }
}

/// Per-level outcome of one access. The discriminants are the output codes
/// consumed by existing trace checkers and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum AccessState {
    /// no action
    #[default]
    NA = 0,
    /// read hit
    RH = 1,
    /// read miss
    RM = 2,
    /// write hit
    WH = 3,
    /// write miss
    WM = 4,
}

impl AccessState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn hit(access: AccessType) -> Self {
        match access {
            AccessType::Read => Self::RH,
            AccessType::Write => Self::WH,
        }
    }

    pub fn miss(access: AccessType) -> Self {
        match access {
            AccessType::Read => Self::RM,
            AccessType::Write => Self::WM,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Self::RH | Self::WH)
    }

    pub fn is_miss(self) -> bool {
        matches!(self, Self::RM | Self::WM)
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AccessResult {
    pub l1: AccessState,
    pub l2: AccessState,
}

impl AccessResult {
    pub fn new(l1: AccessState, l2: AccessState) -> Self {
        Self { l1, l2 }
    }
}

/// Formats as one output line body: `"<l1> <l2>"`.
impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.l1, self.l2)
    }
}
