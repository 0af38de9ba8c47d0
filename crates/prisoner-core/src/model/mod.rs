pub mod attribute;
pub mod chip;
pub mod color;
pub mod guess;
pub mod hand;
pub mod hint;
pub mod player;
pub mod priors;
pub mod round;
pub mod shape;
