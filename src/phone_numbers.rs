use std::io::{self, BufWriter, Write};
use std::time::Instant;

use log::{debug, info};
use num_format::{Locale, ToFormattedString};

use crate::board::{Board, Square};
use crate::keypad::{KEYPAD_HEIGHT, KEYPAD_WIDTH, contains_digit, key_for_square, key_to_square};
use crate::move_generator::Piece;
use crate::search::{TraversalRules, traverse};

pub const DEFAULT_LENGTH: usize = 10;
pub const MAX_LENGTH: usize = 16;

/// Rows a pawn may take its double step from.
const DOUBLE_STEP_ROWS: i32 = 2;

/// Enumerates every phone number `piece` can dial from `start_key`, dialing
/// one digit per move. With `summary` set, only the count is reported.
pub fn run(piece: Piece, start_key: char, length: usize, summary: bool) -> Result<(), String> {
    let start = start_square(start_key)?;
    if !(1..=MAX_LENGTH).contains(&length) {
        return Err(format!("phone numbers must be between 1 and {MAX_LENGTH} digits long"));
    }

    debug!("dialing {length}-digit numbers with a {piece:?} from key '{start_key}' at {start}");

    let start_time = Instant::now();
    let stdout = io::stdout().lock();
    let count = enumerate(BufWriter::new(stdout), piece, start, length, !summary)
        .map_err(|err| format!("failed writing phone numbers: {err}"))?;
    let elapsed = start_time.elapsed();

    info!("found {count} phone numbers in {elapsed:#?}");
    if summary {
        if count == 1 {
            println!("Found one phone number in {elapsed:#?}");
        } else {
            println!(
                "Found {} phone numbers in {elapsed:#?}",
                count.to_formatted_string(&Locale::en)
            );
        }
    }

    Ok(())
}

fn start_square(key: char) -> Result<Square, String> {
    u8::try_from(key)
        .ok()
        .and_then(key_to_square)
        .filter(|square| contains_digit(*square))
        .ok_or_else(|| format!("'{key}' is not a digit key on the keypad"))
}

fn enumerate<W: Write>(out: W, piece: Piece, start: Square, length: usize, print_numbers: bool) -> io::Result<u64> {
    let mut board = Board::new(KEYPAD_WIDTH, KEYPAD_HEIGHT);
    let mut walk = PhoneNumberWalk {
        out,
        print_numbers,
        count: 0,
    };

    traverse(&mut board, &mut walk, start, piece, length)?;
    walk.out.flush()?;

    Ok(walk.count)
}

struct PhoneNumberWalk<W: Write> {
    out: W,
    print_numbers: bool,
    count: u64,
}

impl<W: Write> TraversalRules for PhoneNumberWalk<W> {
    fn symbol(&self, square: Square) -> u8 {
        key_for_square(square)
    }

    fn is_valid(&self, square: Square, _taken: &[u8]) -> bool {
        contains_digit(square)
    }

    fn reevaluate(&self, piece: Piece, square: Square, depth: usize) -> Piece {
        reevaluate_piece(piece, square, depth)
    }

    // Sitting on the same key dials its digit again.
    fn allow_stay(&self) -> bool {
        true
    }

    fn emit(&mut self, sequence: &[u8]) -> io::Result<()> {
        self.count += 1;

        if self.print_numbers {
            self.out.write_all(sequence)?;
            self.out.write_all(b"\n")?;
        }

        Ok(())
    }
}

/// Pawn state transitions, applied before each move is looked up:
/// a pawn starting on one of the two bottom rows gets its double step for
/// the first move, any pawn standing on the top row becomes a queen, and
/// the double step expires after the first move.
fn reevaluate_piece(piece: Piece, square: Square, depth: usize) -> Piece {
    match piece {
        Piece::Pawn if depth == 1 && square.y < DOUBLE_STEP_ROWS => Piece::PawnFirstMove,
        Piece::Pawn | Piece::PawnFirstMove if square.y == KEYPAD_HEIGHT - 1 => Piece::Queen,
        Piece::PawnFirstMove if depth >= 2 => Piece::Pawn,
        _ => piece,
    }
}

#[cfg(test)]
mod phone_numbers_tests {
    use super::*;

    fn dialed(piece: Piece, key: u8, length: usize) -> (u64, Vec<String>) {
        let mut out = Vec::new();
        let start = key_to_square(key).unwrap();
        let count = enumerate(&mut out, piece, start, length, true).unwrap();
        let numbers = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();

        (count, numbers)
    }

    #[test]
    pub fn single_digit_number_is_the_start_key() {
        let (count, numbers) = dialed(Piece::King, b'5', 1);

        assert_eq!(1, count);
        assert_eq!(vec!["5"], numbers);
    }

    #[test]
    pub fn king_dials_itself_and_every_neighbouring_digit() {
        let (count, numbers) = dialed(Piece::King, b'5', 2);

        assert_eq!(9, count);
        assert_eq!(vec!["55", "56", "52", "54", "58", "53", "51", "59", "57"], numbers);
    }

    #[test]
    pub fn pawn_takes_its_double_step_from_the_bottom_rows() {
        let (_, numbers) = dialed(Piece::Pawn, b'0', 2);

        assert_eq!(vec!["00", "08", "05"], numbers);
    }

    #[test]
    pub fn pawn_off_the_bottom_rows_moves_a_single_square() {
        let (_, numbers) = dialed(Piece::Pawn, b'5', 2);

        assert_eq!(vec!["55", "52"], numbers);
    }

    #[test]
    pub fn promoted_pawn_dials_like_a_queen() {
        // '8' sits at (1, 1): the double step lands on the top row, where
        // the pawn becomes a queen and fans out over the whole column and
        // the top-row diagonals.
        let (count, numbers) = dialed(Piece::Pawn, b'8', 3);

        assert_eq!(12, count);
        assert_eq!(
            vec!["888", "885", "855", "852", "822", "823", "821", "825", "828", "820", "826", "824"],
            numbers
        );
    }

    #[test]
    pub fn pawn_state_machine_transitions() {
        let low_start = Square { x: 1, y: 0 };
        let mid_board = Square { x: 1, y: 2 };
        let top_row = Square { x: 1, y: 3 };

        assert_eq!(Piece::PawnFirstMove, reevaluate_piece(Piece::Pawn, low_start, 1));
        assert_eq!(Piece::Pawn, reevaluate_piece(Piece::Pawn, mid_board, 1));

        assert_eq!(Piece::Queen, reevaluate_piece(Piece::Pawn, top_row, 2));
        assert_eq!(Piece::Queen, reevaluate_piece(Piece::PawnFirstMove, top_row, 2));

        assert_eq!(Piece::Pawn, reevaluate_piece(Piece::PawnFirstMove, mid_board, 2));

        assert_eq!(Piece::Knight, reevaluate_piece(Piece::Knight, top_row, 2));
        assert_eq!(Piece::Queen, reevaluate_piece(Piece::Queen, low_start, 5));
    }

    #[test]
    pub fn non_digit_start_keys_are_rejected() {
        assert!(start_square('*').is_err());
        assert!(start_square('#').is_err());
        assert!(start_square('x').is_err());
        assert_eq!(Ok(Square { x: 1, y: 2 }), start_square('5'));
    }
}
