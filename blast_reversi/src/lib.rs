pub use board::*;
pub use errors::*;
pub use game::*;
pub use history::*;
pub use piece::*;
pub use position_set::*;
pub use side::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod history;
mod piece;
mod position_set;
mod side;
