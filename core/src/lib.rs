pub mod board;
pub mod display;
pub mod error;
pub mod game_state;
pub mod move_gen;
pub mod perft;
pub mod player;
pub mod selection;
pub mod types;

pub use board::*;
pub use display::{decode_board, encode_board, DisplayGeometry, ENCODED_LEN};
pub use error::GameError;
pub use game_state::*;
pub use move_gen::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use player::*;
pub use selection::{ClickResult, Selection};
pub use types::*;
