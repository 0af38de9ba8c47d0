use core::fmt;
use core::hash::Hash;
use serde::{Deserialize, Serialize};

/// Which universe an attribute value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Color,
    Shape,
}

impl AttributeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Color => "color",
            AttributeKind::Shape => "shape",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value from one of the fixed four-element universes.
///
/// `ALL` lists the universe in its canonical cyclic order.
pub trait Attribute: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    const KIND: AttributeKind;
    const ALL: [Self; 4];

    fn index(self) -> usize;

    /// Single-letter code used in compact table labels.
    fn code(self) -> char;
}
