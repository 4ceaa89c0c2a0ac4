mod game;
mod player;
mod render;
mod tournament;
pub use game::*;
pub use player::*;
pub use render::*;
pub use tournament::*;
