//! Tests the searches on chess positions
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod mate {
    use chess::Position;
    use stockpig::{Material, Score, Search};

    fn best(fen: &str, depth: usize, pruned: bool) -> (String, Score) {
        let mut pos: Position = fen.parse().unwrap();
        let original = pos.clone();

        let result = if pruned {
            Search::new().alpha_beta(&mut pos, &Material, depth)
        } else {
            Search::new().minimax(&mut pos, &Material, depth)
        };

        assert_eq!(pos, original);
        assert_eq!(pos.zobrist_key(), original.zobrist_key());
        (result.best_move.unwrap().to_string(), result.score)
    }

    // 1. Mate in one is found at any depth
    #[test]
    fn back_rank() {
        for depth in 1 ..= 3 {
            let (mv, score) = best("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", depth, true);
            assert_eq!(mv, "a1a8");
            assert_eq!(score, Score::mates_in(1));
        }
    }

    // 2. The rook sacrifice which forces mate with the pawn
    #[test]
    fn rook_sacrifice() {
        let fen = "kbK5/pp6/1P6/8/8/8/8/R7 w - - 0 1";
        assert_eq!(best(fen, 4, true), ("a1a6".to_owned(), Score::mates_in(3)));
        assert_eq!(best(fen, 4, false), ("a1a6".to_owned(), Score::mates_in(3)));
    }

    // 3. The quiet queen move
    #[test]
    fn queen_to_b2() {
        let fen = "8/8/8/2P3R1/5B2/2rP1p2/p1P1PP2/RnQ1K2k w Q - 0 1";
        assert_eq!(best(fen, 4, true).0, "c1b2");
    }

    // 4. Black mates too, and the score says so
    #[test]
    fn black_to_mate() {
        let (mv, score) = best("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", 2, true);
        assert_eq!(mv, "a8a1");
        assert_eq!(score, Score::mated_in(1));
    }
}

mod equivalence {
    use chess::Position;
    use stockpig::{Material, Search};

    const POSITIONS: [(&str, usize); 5] = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4),
        ("kbK5/pp6/1P6/8/8/8/8/R7 w - - 0 1", 4),
        ("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4", 3),
    ];

    // 1. Pruning never changes the score, only the amount of work
    #[test]
    fn alpha_beta_matches_minimax() {
        for (fen, depth) in POSITIONS.iter() {
            let mut pos: Position = fen.parse().unwrap();

            let full = Search::new().minimax(&mut pos, &Material, *depth);
            let pruned = Search::new().alpha_beta(&mut pos, &Material, *depth);

            assert_eq!(pruned.score, full.score, "{}", fen);
            assert_eq!(pruned.best_move, full.best_move, "{}", fen);
            assert!(pruned.nodes <= full.nodes, "{}", fen);
            assert_eq!(pos.to_fen_str(), *fen);
        }
    }

    // 2. At depth zero every search is the static score
    #[test]
    fn depth_zero() {
        let mut pos = Position::new();
        let full = Search::new().minimax(&mut pos, &Material, 0);
        let pruned = Search::new().alpha_beta(&mut pos, &Material, 0);
        assert_eq!(full, pruned);
        assert_eq!(full.best_move, None);
    }
}

mod quiescence {
    use chess::Position;
    use stockpig::{Algorithm, Material, Search, SearchConfig};

    // the d5 pawn is defended by the knight
    const POISONED: &str = "4k3/2n5/8/3p4/8/8/8/3QK3 w - - 0 1";

    // 1. A shallow search grabs the pawn, a quiescence search sees the recapture
    #[test]
    fn horizon() {
        let mut pos: Position = POISONED.parse().unwrap();

        let shallow = Search::new().alpha_beta(&mut pos, &Material, 1);
        assert_eq!(shallow.best_move.unwrap().to_string(), "d1d5");

        let deeper = Search::new().quiescence(&mut pos, &Material, 1, 4);
        assert_ne!(deeper.best_move.unwrap().to_string(), "d1d5");
        assert!(deeper.score < shallow.score);
        assert_eq!(pos.to_fen_str(), POISONED);
    }

    // 2. The configuration picks the search
    #[test]
    fn configured() {
        let config = SearchConfig {
            depth: 1,
            quiescence_depth: 4,
            algorithm: Algorithm::Quiescence,
        };
        let mut pos: Position = POISONED.parse().unwrap();

        let mut search = Search::new();
        let result = search.run(&config, &mut pos, &Material);
        assert_eq!(result.nodes, search.nodes());
        assert_ne!(result.best_move.unwrap().to_string(), "d1d5");
    }

    // 3. Mates are still found past the horizon
    #[test]
    fn mate_through_quiescence() {
        let mut pos: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse().unwrap();
        let result = Search::new().quiescence(&mut pos, &Material, 1, 2);
        assert_eq!(result.best_move.unwrap().to_string(), "a1a8");
        assert!(result.score.is_mate());
    }
}

mod terminal {
    use chess::Position;
    use stockpig::{Material, Score, Search};

    // 1. Nothing to search from a finished game
    #[test]
    fn no_moves_at_the_root() {
        let mut mated: Position = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1".parse().unwrap();
        let result = Search::new().alpha_beta(&mut mated, &Material, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, Score::MATE);
        assert_eq!(result.nodes, 1);

        let mut stalemate: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = Search::new().minimax(&mut stalemate, &Material, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, Score::DRAW);
    }

    // 2. Stalemating instead of mating is seen as a draw
    #[test]
    fn avoids_stalemate() {
        // Qf7 stalemates, Qf8 mates
        let mut pos: Position = "7k/8/6K1/8/8/8/8/5Q2 w - - 0 1".parse().unwrap();
        let result = Search::new().alpha_beta(&mut pos, &Material, 2);
        assert!(result.score.is_mate());
        assert_ne!(result.best_move.unwrap().to_string(), "f1f7");
    }
}
