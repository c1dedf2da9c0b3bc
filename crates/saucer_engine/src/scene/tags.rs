//! Node tags for lifecycle, classification, and weapon identity

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

bitflags! {
    /// Set of markers carried by every scene node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tags: u16 {
        /// Remove the node (and its subtree) at the end of the current update
        const DELETE = 1 << 0;
        /// Can be lifted by the tractor beam
        const CAN_PICK_UP = 1 << 1;
        /// Counts toward the inventory when lifted
        const CAN_COLLECT = 1 << 2;
        /// Decorative hay circling the player
        const ORBITING_HAY = 1 << 3;
        /// Dropped hay bomb
        const BOMB = 1 << 4;
        /// Tractor beam weapon node
        const TRACTOR_BEAM = 1 << 5;
        /// Shield weapon node
        const SHIELD = 1 << 6;
    }
}

const NAMES: [(&str, Tags); 7] = [
    ("delete", Tags::DELETE),
    ("canPickUp", Tags::CAN_PICK_UP),
    ("canCollect", Tags::CAN_COLLECT),
    ("orbitingHay", Tags::ORBITING_HAY),
    ("bomb", Tags::BOMB),
    ("TRACTORBEAM", Tags::TRACTOR_BEAM),
    ("SHIELD", Tags::SHIELD),
];

/// Unknown tag name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown tag: {0}")]
pub struct TagParseError(pub String);

impl FromStr for Tags {
    type Err = TagParseError;

    /// Parse a single tag by its scene-script name, e.g. `canPickUp`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, tag)| *tag)
            .ok_or_else(|| TagParseError(s.to_string()))
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, tag) in NAMES {
            if self.contains(tag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
