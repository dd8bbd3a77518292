//! 2048 moves applied to client-held boards.

use rand::rng;

use crate::{
    dto::board::{BoardMoveRequest, BoardMoveResponse, NewBoardResponse},
    state::board::Board,
};

/// Deal a new 2048 board with its two starting tiles.
pub fn new_board() -> NewBoardResponse {
    NewBoardResponse {
        board: Board::start(&mut rng()).grid(),
    }
}

/// Apply one move to a client-held 2048 board.
pub fn play_move(request: BoardMoveRequest) -> BoardMoveResponse {
    let mut board = Board::from_grid(request.board);
    let outcome = board.play(request.direction, &mut rng());

    BoardMoveResponse {
        board: board.grid(),
        moved: outcome.moved,
        points: outcome.points,
        game_over: board.is_game_over(),
        max_tile: board.max_tile(),
    }
}
