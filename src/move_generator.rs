use tinyvec::TinyVec;

use crate::board::{Dimensions, Square};

/// One-move destinations in generator order. Inline for any board whose
/// lists fit 16 squares; larger boards spill to the heap.
pub type MoveList = TinyVec<[Square; 16]>;

/// Movement behaviors. `PawnFirstMove` is a pawn that may still take its
/// double step; it is a separate variant so the move lookup can key on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Piece {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
    PawnFirstMove,
}

pub const NUM_PIECES: usize = 7;

/// Effectively no hop limit; the board edge stops a slide long before this
/// many hops.
pub const UNLIMITED_HOPS: u32 = u32::MAX;

const PERPENDICULAR_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
#[rustfmt::skip]
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

/// Converts the name of a chess piece to its enumeration value. Only the six
/// real pieces are nameable; internal variants are not.
pub fn piece_from_name(name: &str) -> Option<Piece> {
    match name.to_ascii_lowercase().as_str() {
        "king" => Some(Piece::King),
        "queen" => Some(Piece::Queen),
        "bishop" => Some(Piece::Bishop),
        "knight" | "horse" => Some(Piece::Knight),
        "rook" | "castle" => Some(Piece::Rook),
        "pawn" => Some(Piece::Pawn),
        _ => None,
    }
}

/// All squares `piece` can reach in one move from `start`, clipped at the
/// board edges. The list never contains `start` itself.
pub fn generate_moves(dims: Dimensions, start: Square, piece: Piece) -> MoveList {
    let mut moves = MoveList::default();

    match piece {
        Piece::King => {
            add_perpendicular_moves(&mut moves, dims, start, 1);
            add_diagonal_moves(&mut moves, dims, start, 1);
        }
        Piece::Queen => {
            add_perpendicular_moves(&mut moves, dims, start, UNLIMITED_HOPS);
            add_diagonal_moves(&mut moves, dims, start, UNLIMITED_HOPS);
        }
        Piece::Bishop => {
            add_diagonal_moves(&mut moves, dims, start, UNLIMITED_HOPS);
        }
        Piece::Knight => {
            for (dx, dy) in KNIGHT_OFFSETS {
                add_vector_moves(&mut moves, dims, start, dx, dy, 1);
            }
        }
        Piece::Rook => {
            add_perpendicular_moves(&mut moves, dims, start, UNLIMITED_HOPS);
        }
        Piece::Pawn => {
            add_vector_moves(&mut moves, dims, start, 0, 1, 1);
        }
        Piece::PawnFirstMove => {
            add_vector_moves(&mut moves, dims, start, 0, 1, 2);
        }
    }

    moves
}

fn add_perpendicular_moves(moves: &mut MoveList, dims: Dimensions, start: Square, max_hops: u32) {
    for (dx, dy) in PERPENDICULAR_DIRECTIONS {
        add_vector_moves(moves, dims, start, dx, dy, max_hops);
    }
}

fn add_diagonal_moves(moves: &mut MoveList, dims: Dimensions, start: Square, max_hops: u32) {
    for (dx, dy) in DIAGONAL_DIRECTIONS {
        add_vector_moves(moves, dims, start, dx, dy, max_hops);
    }
}

/// Steps `(dx, dy)` from `start` up to `max_hops` times, emitting every
/// square reached until one falls off the board.
fn add_vector_moves(moves: &mut MoveList, dims: Dimensions, start: Square, dx: i32, dy: i32, max_hops: u32) {
    let mut square = start;
    let mut hops_left = max_hops;

    while hops_left > 0 {
        square.x += dx;
        square.y += dy;

        if !dims.contains(square) {
            break;
        }

        moves.push(square);
        hops_left -= 1;
    }
}
