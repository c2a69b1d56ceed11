use std::fmt;

/// World distance (1024 units per world unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct WorldDistance(pub i16);

impl WorldDistance {
    pub const UNITS_PER_WORLD: f64 = 1024.0;

    pub fn from_world(world: f64) -> Self {
        Self((world * Self::UNITS_PER_WORLD).round_ties_even() as i16)
    }

    pub fn to_world(self) -> f64 {
        self.0 as f64 / Self::UNITS_PER_WORLD
    }

    pub fn raw(self) -> i16 {
        self.0
    }
}

impl From<i16> for WorldDistance {
    fn from(v: i16) -> Self {
        Self(v)
    }
}

/// Angle (512 units per full circle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Angle(pub i16);

impl Angle {
    pub const UNITS_PER_CIRCLE: f64 = 512.0;

    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees * Self::UNITS_PER_CIRCLE / 360.0).round_ties_even() as i16)
    }

    pub fn to_degrees(self) -> f64 {
        self.0 as f64 * 360.0 / Self::UNITS_PER_CIRCLE
    }

    pub fn raw(self) -> i16 {
        self.0
    }
}

impl From<i16> for Angle {
    fn from(v: i16) -> Self {
        Self(v)
    }
}

/// 16.16 fixed-point value (light intensities, sound pitch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ONE: i32 = 1 << 16;

    pub fn from_f64(v: f64) -> Self {
        Self((v * Self::ONE as f64).round_ties_even() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::ONE as f64
    }
}

/// 2D point in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorldPoint2d {
    pub x: i16,
    pub y: i16,
}

impl WorldPoint2d {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn from_world(x: f64, y: f64) -> Self {
        Self {
            x: WorldDistance::from_world(x).raw(),
            y: WorldDistance::from_world(y).raw(),
        }
    }

    pub fn to_world(self) -> (f64, f64) {
        (WorldDistance(self.x).to_world(), WorldDistance(self.y).to_world())
    }
}

/// Four-character chunk tag, compared as a raw big-endian u32
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    pub const fn new(code: &[u8; 4]) -> Self {
        Self(u32::from_be_bytes(*code))
    }

    pub fn bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bytes() {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}
