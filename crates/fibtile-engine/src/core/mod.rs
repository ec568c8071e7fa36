pub use self::{action::*, board::*, rank::*, slide::*};

pub(crate) mod action;
pub(crate) mod board;
pub(crate) mod rank;
pub(crate) mod slide;
