//! Bitmask identifying which input device(s) a tool binding applies to.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A set of input device classes, stored as a bitmask so one binding can
/// cover e.g. "stylus OR mouse" without enumerating both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeviceMask(u8);

impl DeviceMask {
    pub const NONE: DeviceMask = DeviceMask(0);
    pub const MOUSE: DeviceMask = DeviceMask(1 << 0);
    pub const STYLUS: DeviceMask = DeviceMask(1 << 1);
    pub const STYLUS_ERASER: DeviceMask = DeviceMask(1 << 2);
    pub const TOUCH: DeviceMask = DeviceMask(1 << 3);
    pub const KEYBOARD: DeviceMask = DeviceMask(1 << 4);
    pub const ANY: DeviceMask = DeviceMask(0b1_1111);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        DeviceMask(bits & Self::ANY.0)
    }

    pub fn intersects(self, other: DeviceMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: DeviceMask) -> DeviceMask {
        DeviceMask(self.0 | other.0)
    }
}

impl std::ops::BitOr for DeviceMask {
    type Output = DeviceMask;
    fn bitor(self, rhs: DeviceMask) -> DeviceMask {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_intersects_every_single_device() {
        for device in [
            DeviceMask::MOUSE,
            DeviceMask::STYLUS,
            DeviceMask::STYLUS_ERASER,
            DeviceMask::TOUCH,
            DeviceMask::KEYBOARD,
        ] {
            assert!(DeviceMask::ANY.intersects(device));
        }
    }

    #[test]
    fn none_intersects_nothing() {
        assert!(!DeviceMask::NONE.intersects(DeviceMask::MOUSE));
    }

    #[test]
    fn union_combines_bits() {
        let combo = DeviceMask::MOUSE | DeviceMask::TOUCH;
        assert!(combo.intersects(DeviceMask::MOUSE));
        assert!(combo.intersects(DeviceMask::TOUCH));
        assert!(!combo.intersects(DeviceMask::STYLUS));
    }
}
