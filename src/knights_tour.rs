use std::io::{self, BufWriter, Write};
use std::time::Instant;

use log::{debug, info};
use num_format::{Locale, ToFormattedString};

use crate::board::{Board, Square};
use crate::keypad::{KEYPAD_HEIGHT, KEYPAD_WIDTH, key_for_square, key_to_square};
use crate::move_generator::Piece;
use crate::search::{TraversalRules, traverse};

/// A tour visits every key exactly once.
const TOUR_LENGTH: usize = (KEYPAD_WIDTH * KEYPAD_HEIGHT) as usize;

/// Outputs every knight's tour of the keypad beginning on `start_key`.
/// '*' and '#' are acceptable starting keys; a tour covers them too.
pub fn run(start_key: char) -> Result<(), String> {
    let start = u8::try_from(start_key)
        .ok()
        .and_then(key_to_square)
        .ok_or_else(|| format!("'{start_key}' is not a key on the keypad"))?;

    debug!("searching for knight's tours from key '{start_key}' at {start}");

    let start_time = Instant::now();
    let stdout = io::stdout().lock();
    let count = enumerate(BufWriter::new(stdout), start).map_err(|err| format!("failed writing tours: {err}"))?;
    let elapsed = start_time.elapsed();

    info!("found {count} knight's tours in {elapsed:#?}");
    if count == 0 {
        println!("No knight's tours available");
    } else {
        println!("Found {} knight's tours", count.to_formatted_string(&Locale::en));
    }

    Ok(())
}

fn enumerate<W: Write>(out: W, start: Square) -> io::Result<u64> {
    let mut board = Board::new(KEYPAD_WIDTH, KEYPAD_HEIGHT);
    let mut walk = TourWalk { out, count: 0 };

    traverse(&mut board, &mut walk, start, Piece::Knight, TOUR_LENGTH)?;
    walk.out.flush()?;

    Ok(walk.count)
}

struct TourWalk<W: Write> {
    out: W,
    count: u64,
}

impl<W: Write> TraversalRules for TourWalk<W> {
    fn symbol(&self, square: Square) -> u8 {
        key_for_square(square)
    }

    // The same key must not be visited twice.
    fn is_valid(&self, square: Square, taken: &[u8]) -> bool {
        !taken.contains(&key_for_square(square))
    }

    fn emit(&mut self, sequence: &[u8]) -> io::Result<()> {
        self.count += 1;
        self.out.write_all(sequence)?;
        self.out.write_all(b"\n")
    }
}
