//! Game flow on top of the core board types.
//!
//! - [`Episode`] - One game: the board, the accumulated score and the recorded steps
//! - [`Step`] - One applied action with the reward it produced
//!
//! # Game Flow
//!
//! A typical episode progresses as follows:
//!
//! 1. Start from the empty board with [`Episode::new`]
//! 2. The environment places two tiles
//! 3. The player slides the board, then the environment places a tile
//! 4. Repeat step 3 until an agent gives up or an action is illegal
pub use self::episode::*;

mod episode;
