//! 2048 board payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::state::board::{Direction, Grid, MAX_TILE, is_valid_tile};

/// Current 2048 board plus the move the player made.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BoardMoveRequest {
    /// Tile values row by row, `0` for empty cells.
    #[schema(value_type = Vec<Vec<u32>>)]
    #[validate(custom(function = "validate_grid"))]
    pub board: Grid,
    /// Direction the tiles are pushed.
    pub direction: Direction,
}

/// Every cell must be empty or a power of two no larger than [`MAX_TILE`].
fn validate_grid(grid: &Grid) -> Result<(), ValidationError> {
    match grid.iter().flatten().find(|&&value| !is_valid_tile(value)) {
        None => Ok(()),
        Some(value) => {
            let mut err = ValidationError::new("board_tile");
            err.message = Some(
                format!("Tiles must be 0 or a power of two from 2 to {MAX_TILE} (got {value})")
                    .into(),
            );
            Err(err)
        }
    }
}

/// Board after the move and any spawned tile.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardMoveResponse {
    /// Tile values row by row.
    #[schema(value_type = Vec<Vec<u32>>)]
    pub board: Grid,
    /// Whether the move changed the board.
    pub moved: bool,
    /// Points gained from merges.
    pub points: u32,
    /// No further move can change the board.
    pub game_over: bool,
    /// Highest tile after the move.
    pub max_tile: u32,
}

/// Freshly dealt board.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewBoardResponse {
    /// Tile values row by row.
    #[schema(value_type = Vec<Vec<u32>>)]
    pub board: Grid,
}
