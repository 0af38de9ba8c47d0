use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    A = 0,
    B = 1,
}

impl Seat {
    pub const LOOP: [Seat; 2] = [Seat::A, Seat::B];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::A),
            1 => Some(Seat::B),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::A => "Player A",
            Seat::B => "Player B",
        };
        f.write_str(label)
    }
}
