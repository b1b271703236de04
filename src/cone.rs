//! Track cones and ordered single-kind cone arrays.

use crate::error::{Result, ValidationError};
use crate::math::{is_finite, Point2d};
use itertools::Itertools;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The kinds of cone defined by the Formula Student rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ConeKind {
    /// Right-hand track boundary.
    Yellow,
    /// Entry and exit lanes.
    Orange,
    /// Start, finish and timekeeping lines.
    OrangeBig,
    /// Left-hand track boundary.
    Blue,
}

impl ConeKind {
    /// Every cone kind, in declaration order.
    pub const ALL: [ConeKind; 4] = [Self::Yellow, Self::Orange, Self::OrangeBig, Self::Blue];

    /// The canonical name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::OrangeBig => "orange-big",
            Self::Blue => "blue",
        }
    }
}

impl FromStr for ConeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yellow" => Ok(Self::Yellow),
            "orange" => Ok(Self::Orange),
            "orange-big" | "orange_big" => Ok(Self::OrangeBig),
            "blue" => Ok(Self::Blue),
            other => Err(ValidationError::UnknownConeKind(other.to_owned())),
        }
    }
}

impl fmt::Display for ConeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single track cone.
///
/// The position always has finite coordinates, which makes
/// equality total and lets cones be used as set or map keys.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cone {
    position: Point2d,
    kind: ConeKind,
}

impl Cone {
    /// Creates a new cone, failing if the position is not finite.
    pub fn new(position: Point2d, kind: ConeKind) -> Result<Self> {
        check_position(position)?;
        Ok(Self { position, kind })
    }

    /// Creates a new cone from the name of its kind.
    pub fn parse(position: Point2d, kind: &str) -> Result<Self> {
        Self::new(position, kind.parse()?)
    }

    /// Gets the position of the cone.
    pub fn position(&self) -> Point2d {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Gets the kind of cone.
    pub fn kind(&self) -> ConeKind {
        self.kind
    }

    /// Moves the cone.
    pub fn set_position(&mut self, position: Point2d) -> Result<()> {
        check_position(position)?;
        self.position = position;
        Ok(())
    }

    /// Changes the kind of the cone.
    pub fn set_kind(&mut self, kind: ConeKind) {
        self.kind = kind;
    }
}

fn check_position(position: Point2d) -> Result<()> {
    if is_finite(position) {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field: "position" })
    }
}

/// Bit pattern of a coordinate, with both zeroes mapped together
/// so that hashing agrees with `==`.
fn coord_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

impl PartialEq for Cone {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.kind == other.kind
    }
}

impl Eq for Cone {}

impl Hash for Cone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        coord_bits(self.position.x).hash(state);
        coord_bits(self.position.y).hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for Cone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cone({}, {}, {})", self.position.x, self.position.y, self.kind)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cone {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            position: Point2d,
            kind: ConeKind,
        }
        let raw = Raw::deserialize(deserializer)?;
        Cone::new(raw.position, raw.kind).map_err(serde::de::Error::custom)
    }
}

/// An ordered group of cones which all share the same kind,
/// typically one boundary line of the track.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConeArray {
    cones: Vec<Cone>,
}

impl ConeArray {
    /// Creates a cone array, failing if the cones are of mixed kinds.
    pub fn new(cones: Vec<Cone>) -> Result<Self> {
        check_homogeneous(&cones)?;
        Ok(Self { cones })
    }

    /// Creates an empty cone array.
    pub const fn empty() -> Self {
        Self { cones: Vec::new() }
    }

    /// Creates a cone array of the given kind from a sequence of positions.
    pub fn from_positions(kind: ConeKind, positions: impl IntoIterator<Item = Point2d>) -> Result<Self> {
        let cones = positions
            .into_iter()
            .map(|pos| Cone::new(pos, kind))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cones })
    }

    /// The kind shared by every cone, or `None` if the array is empty.
    pub fn kind(&self) -> Option<ConeKind> {
        self.cones.first().map(Cone::kind)
    }

    /// Gets the cones in the array, in order.
    pub fn cones(&self) -> &[Cone] {
        &self.cones
    }

    /// Returns an iterator over the cones in the array.
    pub fn iter(&self) -> std::slice::Iter<'_, Cone> {
        self.cones.iter()
    }

    /// Returns an iterator over the positions of the cones in the array.
    pub fn positions(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.cones.iter().map(Cone::position)
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Cone> {
        self.cones.get(idx)
    }

    /// Appends a cone to the end of the array.
    pub fn push(&mut self, cone: Cone) -> Result<()> {
        if let Some(expected) = self.kind() {
            if cone.kind() != expected {
                return Err(ValidationError::MixedConeKinds {
                    expected,
                    found: cone.kind(),
                });
            }
        }
        self.cones.push(cone);
        Ok(())
    }

    /// Replaces the contents of the array.
    /// On failure the existing contents are kept.
    pub fn set_cones(&mut self, cones: Vec<Cone>) -> Result<()> {
        check_homogeneous(&cones)?;
        self.cones = cones;
        Ok(())
    }

    /// Creates a new array holding the cones which satisfy the predicate,
    /// in their original order.
    pub fn filtered(&self, mut pred: impl FnMut(&Cone) -> bool) -> ConeArray {
        Self {
            cones: self.cones.iter().filter(|cone| pred(cone)).copied().collect(),
        }
    }

    /// Consumes the array, returning its cones.
    pub fn into_cones(self) -> Vec<Cone> {
        self.cones
    }
}

fn check_homogeneous(cones: &[Cone]) -> Result<()> {
    match cones.iter().map(Cone::kind).dedup().nth(1) {
        Some(found) => Err(ValidationError::MixedConeKinds {
            expected: cones[0].kind(),
            found,
        }),
        None => Ok(()),
    }
}

impl TryFrom<Vec<Cone>> for ConeArray {
    type Error = ValidationError;

    fn try_from(cones: Vec<Cone>) -> Result<Self> {
        Self::new(cones)
    }
}

impl<'a> IntoIterator for &'a ConeArray {
    type Item = &'a Cone;
    type IntoIter = std::slice::Iter<'a, Cone>;

    fn into_iter(self) -> Self::IntoIter {
        self.cones.iter()
    }
}

impl IntoIterator for ConeArray {
    type Item = Cone;
    type IntoIter = std::vec::IntoIter<Cone>;

    fn into_iter(self) -> Self::IntoIter {
        self.cones.into_iter()
    }
}

impl fmt::Display for ConeArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConeArray[{}]", self.cones.iter().format(", "))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConeArray {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            cones: Vec<Cone>,
        }
        let raw = Raw::deserialize(deserializer)?;
        ConeArray::new(raw.cones).map_err(serde::de::Error::custom)
    }
}
