//! Small value types shared by the engine and the discipline content.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Name of an item type known to the host server (e.g. `"IronIngot"`).
///
/// The engine never interprets the name; it only compares, orders, and
/// forwards it to the inventory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemType(String);

impl ItemType {
    /// Create an item type from its host-side name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The host-side name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Something the player reads: a localisation number or literal text.
///
/// Content mixes both forms (menu categories are often localisation numbers
/// while shard-specific item names are literal strings), so every
/// user-facing field in the engine is a `Message`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Message {
    /// A client-side localisation number.
    Cliloc(u32),
    /// Literal text.
    Text(String),
}

impl Message {
    /// A localisation-number message.
    pub const fn cliloc(number: u32) -> Self {
        Self::Cliloc(number)
    }

    /// A literal text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl core::fmt::Display for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cliloc(number) => write!(f, "#{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u32> for Message {
    fn from(number: u32) -> Self {
        Self::Cliloc(number)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

// ---------------------------------------------------------------------------
// Hue / SoundId
// ---------------------------------------------------------------------------

/// A client colour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hue(pub u16);

impl core::fmt::Display for Hue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// A client sound effect index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u16);

impl core::fmt::Display for SoundId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub y: i32,
}

/// An axis-aligned rectangle of map tiles, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    /// Western edge.
    pub min_x: i32,
    /// Northern edge.
    pub min_y: i32,
    /// Eastern edge.
    pub max_x: i32,
    /// Southern edge.
    pub max_y: i32,
}

impl Area {
    /// Whether `position` lies inside the rectangle (edges included).
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }
}
