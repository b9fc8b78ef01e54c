//! Module for counting and printing the number of variations from a given position
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Counts ignore the half-move clock and insufficient material, so they can be compared with
//! the published perft results.
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print(pos: &mut Position, depth: usize) -> usize {
    let mut total = 0;

    for (mv, count) in divide(pos, depth) {
        total += count;
        println!("\t{:7}\t{:12}", mv.to_string(), count);
    }

    total
}

/// Count the number of variations of the given `depth` following each legal move from `pos`
///
/// Returns an empty list for a depth of zero.
pub fn divide(pos: &mut Position, depth: usize) -> Vec<(Move, usize)> {
    if depth < 1 {
        return Vec::new();
    }

    pos.legal_moves()
        .into_iter()
        .map(|mv| {
            pos.make_move(mv);
            let n = count(pos, depth - 1);
            pos.unmake_move();
            (mv, n)
        })
        .collect()
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    if depth == 1 {
        return if is_drawn(pos) { pos.legal_moves().len() } else { pos.current_moves().len() };
    }

    let moves = if is_drawn(pos) { pos.legal_moves() } else { pos.current_moves().to_vec() };

    let mut total = 0;
    for mv in moves {
        pos.make_move(mv);
        total += count(pos, depth - 1);
        pos.unmake_move();
    }

    total
}

// the cached moves are empty in a drawn position, so those positions are generated afresh
fn is_drawn(pos: &Position) -> bool {
    pos.half_move_clock() >= position::DRAW_CLOCK || pos.is_dead_position()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_shallow_counts() {
        let mut pos = Position::new();
        assert_eq!(count(&mut pos, 0), 1);
        assert_eq!(count(&mut pos, 1), 20);
        assert_eq!(count(&mut pos, 2), 400);
        assert_eq!(count(&mut pos, 3), 8_902);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn divide_sums_to_count() {
        let mut pos = Position::new();
        let per_move = divide(&mut pos, 3);
        assert_eq!(per_move.len(), 20);
        assert_eq!(per_move.iter().map(|(_, n)| n).sum::<usize>(), 8_902);
        assert!(divide(&mut pos, 0).is_empty());
    }

    #[test]
    fn dead_positions_are_still_counted() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1".parse().expect("valid fen");
        assert!(pos.moves().is_empty());
        // 5 king moves and 7 bishop moves
        assert_eq!(count(&mut pos, 1), 12);
    }

    #[test]
    fn counts_ignore_the_clock() {
        let mut fresh: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().expect("valid fen");
        let mut late: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 49 80".parse().expect("valid fen");
        let n = count(&mut fresh, 3);
        assert!(n > 0);
        assert_eq!(count(&mut late, 3), n);
        assert_eq!(late.to_fen_str(), "4k3/8/8/8/8/8/8/R3K3 w - - 49 80");
    }

    #[test]
    fn counts_after_an_unmade_move() {
        let mut pos = Position::new();
        let mv = pos.parse_move("e2e4").expect("legal move");
        pos.make_move(mv);
        pos.unmake_move();
        assert_eq!(count(&mut pos, 1), 20);
        assert_eq!(count(&mut pos, 2), 400);
    }
}
