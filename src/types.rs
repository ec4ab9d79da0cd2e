//! Newtype wrappers for board cells and board orientations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the 3x3 board, numbered 0-8 in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct MoveId(usize);

impl MoveId {
    /// Every cell of the board in ascending order.
    pub const ALL: [MoveId; 9] = [
        MoveId(0),
        MoveId(1),
        MoveId(2),
        MoveId(3),
        MoveId(4),
        MoveId(5),
        MoveId(6),
        MoveId(7),
        MoveId(8),
    ];

    /// Create a new move id, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] if the value is outside 0-8.
    pub fn new(value: i32) -> crate::Result<Self> {
        if (0..9).contains(&value) {
            Ok(MoveId(value as usize))
        } else {
            Err(crate::Error::InvalidMove { value })
        }
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<MoveId> for usize {
    fn from(id: MoveId) -> Self {
        id.0
    }
}

impl From<MoveId> for i32 {
    fn from(id: MoveId) -> Self {
        id.0 as i32
    }
}

impl TryFrom<i32> for MoveId {
    type Error = crate::Error;

    fn try_from(value: i32) -> crate::Result<Self> {
        MoveId::new(value)
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation of the board relative to the one the weights were learned on.
///
/// Each quarter turn moves the cell at `(row, col)` to `(2 - col, row)`, so a
/// single weight table serves all four orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All four rotations in ascending order of degrees.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Parse a rotation from degrees.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRotation`] for anything other than
    /// 0, 90, 180 or 270.
    pub fn from_degrees(degrees: u16) -> crate::Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(crate::Error::InvalidRotation { degrees }),
        }
    }

    /// Rotation angle in degrees.
    pub fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    fn quarter_turns(&self) -> usize {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(&self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }

    /// Map a cell into the rotated board.
    pub fn apply(&self, id: MoveId) -> MoveId {
        let (mut row, mut col) = (id.0 / 3, id.0 % 3);
        for _ in 0..self.quarter_turns() {
            let new_row = 2 - col;
            let new_col = row;
            row = new_row;
            col = new_col;
        }
        MoveId(row * 3 + col)
    }

    /// Map a cell of the rotated board back to the learned orientation.
    pub fn unrotate(&self, id: MoveId) -> MoveId {
        self.inverse().apply(id)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = crate::Error;

    fn try_from(degrees: u16) -> crate::Result<Self> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rotation: Rotation) -> [usize; 9] {
        let mut out = [0; 9];
        for id in MoveId::ALL {
            out[id.value()] = rotation.apply(id).value();
        }
        out
    }

    #[test]
    fn move_id_rejects_out_of_range() {
        assert!(MoveId::new(-1).is_err());
        assert!(MoveId::new(9).is_err());
        assert_eq!(MoveId::new(8).unwrap().value(), 8);
    }

    #[test]
    fn move_id_deserialization_is_validated() {
        assert_eq!(serde_json::from_str::<MoveId>("4").unwrap(), MoveId(4));
        assert!(serde_json::from_str::<MoveId>("9").is_err());
        assert!(serde_json::from_str::<MoveId>("-1").is_err());
        assert!(serde_json::from_str::<MoveId>("42").is_err());
        assert_eq!(serde_json::to_string(&MoveId(7)).unwrap(), "7");
    }

    #[test]
    fn rotation_deserialization_is_validated() {
        assert_eq!(serde_json::from_str::<Rotation>("270").unwrap(), Rotation::Deg270);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
        assert_eq!(serde_json::to_string(&Rotation::Deg90).unwrap(), "90");
    }

    #[test]
    fn rotation_tables_match_board_geometry() {
        assert_eq!(table(Rotation::Deg0), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(table(Rotation::Deg90), [6, 3, 0, 7, 4, 1, 8, 5, 2]);
        assert_eq!(table(Rotation::Deg180), [8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(table(Rotation::Deg270), [2, 5, 8, 1, 4, 7, 0, 3, 6]);
    }

    #[test]
    fn every_rotation_is_a_bijection() {
        for rotation in Rotation::ALL {
            let mut seen = [false; 9];
            for id in MoveId::ALL {
                seen[rotation.apply(id).value()] = true;
            }
            assert!(seen.iter().all(|&s| s), "{rotation} is not a bijection");
        }
    }

    #[test]
    fn rotation_group_laws_hold() {
        for id in MoveId::ALL {
            let mut four = id;
            for _ in 0..4 {
                four = Rotation::Deg90.apply(four);
            }
            assert_eq!(four, id);
            assert_eq!(Rotation::Deg180.apply(Rotation::Deg180.apply(id)), id);
            assert_eq!(Rotation::Deg270.apply(Rotation::Deg90.apply(id)), id);
            for rotation in Rotation::ALL {
                assert_eq!(rotation.unrotate(rotation.apply(id)), id);
            }
        }
    }

    #[test]
    fn degrees_parse_and_reject() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::from_degrees(rotation.degrees()).unwrap(), rotation);
        }
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(crate::Error::InvalidRotation { degrees: 45 })
        ));
    }
}
