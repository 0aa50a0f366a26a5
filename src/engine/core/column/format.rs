use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical column type committed by inference. The discriminant is the tag
/// byte stored at the start of every column payload.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int32 = 1,
    Float64 = 2,
    Utf8 = 3,
}

impl DType {
    pub const fn name(&self) -> &'static str {
        match self {
            DType::Int32 => "int32",
            DType::Float64 => "float64",
            DType::Utf8 => "utf8",
        }
    }

    /// Width of one stored value for fixed-width types.
    pub const fn fixed_width(&self) -> Option<usize> {
        match self {
            DType::Int32 => Some(4),
            DType::Float64 => Some(8),
            DType::Utf8 => None,
        }
    }
}

impl TryFrom<u8> for DType {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(DType::Int32),
            2 => Ok(DType::Float64),
            3 => Ok(DType::Utf8),
            other => Err(other),
        }
    }
}

impl From<DType> for u8 {
    fn from(d: DType) -> u8 {
        d as u8
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int32" => Ok(DType::Int32),
            "float64" => Ok(DType::Float64),
            "utf8" => Ok(DType::Utf8),
            other => Err(format!("unknown dtype '{}'", other)),
        }
    }
}

/// File format version. It also selects how utf8 payloads lay out offsets:
/// v1 stores one start offset per row (null rows point at 0), v2 stores
/// `rows + 1` cumulative offsets.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    #[default]
    V1 = 1,
    V2 = 2,
}

impl FormatVersion {
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for FormatVersion {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(FormatVersion::V1),
            2 => Ok(FormatVersion::V2),
            other => Err(other),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The two leading bytes of every column payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadHeader {
    pub dtype_tag: u8,
    pub has_nulls: u8,
}

impl PayloadHeader {
    pub const LEN: usize = 2;

    pub fn new(dtype: DType, has_nulls: bool) -> Self {
        Self {
            dtype_tag: dtype.into(),
            has_nulls: has_nulls as u8,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.dtype_tag);
        buf.push(self.has_nulls);
    }

    pub fn read_from(slice: &[u8]) -> Option<Self> {
        if slice.len() < Self::LEN {
            return None;
        }
        Some(Self {
            dtype_tag: slice[0],
            has_nulls: slice[1],
        })
    }
}
