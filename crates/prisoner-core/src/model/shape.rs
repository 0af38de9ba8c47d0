use super::attribute::{Attribute, AttributeKind};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Shape {
    Triangle = 0,
    Square = 1,
    Circle = 2,
    Star = 3,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Triangle, Shape::Square, Shape::Circle, Shape::Star];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Shape::Triangle),
            1 => Some(Shape::Square),
            2 => Some(Shape::Circle),
            3 => Some(Shape::Star),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Circle => "circle",
            Shape::Star => "star",
        }
    }
}

impl Attribute for Shape {
    const KIND: AttributeKind = AttributeKind::Shape;
    const ALL: [Shape; 4] = Shape::ALL;

    fn index(self) -> usize {
        self as usize
    }

    fn code(self) -> char {
        match self {
            Shape::Triangle => 'T',
            Shape::Square => 'Q',
            Shape::Circle => 'C',
            Shape::Star => 'S',
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown shape '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;

    #[test]
    fn display_returns_lowercase_names() {
        assert_eq!(Shape::Star.to_string(), "star");
        assert_eq!(Shape::from_index(1), Some(Shape::Square));
    }

    #[test]
    fn parses_known_names() {
        assert_eq!(" circle ".parse::<Shape>(), Ok(Shape::Circle));
        assert!("hexagon".parse::<Shape>().is_err());
    }
}
