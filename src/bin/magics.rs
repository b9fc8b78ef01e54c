//! Prints the magic multipliers found for the rook and bishop attack tables.
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::time::Instant;
use clap::{App, Arg, crate_version};
use chess::Square;
use chess::bitboard::magic::{Magic, Magics, MAGIC_SEED};

fn main() {
    let matches =
        App::new("stockpig magics")
            .version(crate_version!())
            .about("Searches for magic multipliers and prints them, with the number of index \
                    bits each square uses.")
            .arg(Arg::with_name("seed")
                .long("seed")
                .short("s")
                .value_name("SEED")
                .takes_value(true)
                .help("Seeds the search with a hexadecimal number instead of the built-in seed"))
            .get_matches();

    let seed = match matches.value_of("seed") {
        Some(s) => match u64::from_str_radix(s.trim_start_matches("0x"), 16) {
            Ok(seed) => seed,
            Err(err) => {
                eprintln!("{}: {}", s, err);
                std::process::exit(1);
            }
        },
        None => MAGIC_SEED,
    };

    let start = Instant::now();
    let magics = Magics::find(seed);
    println!("// seed {:#018x}, found in {:.3}s", seed, start.elapsed().as_secs_f64());

    print_table("ROOK", Square::iter().map(|sq| magics.rook(sq)));
    print_table("BISHOP", Square::iter().map(|sq| magics.bishop(sq)));
}

fn print_table<'a>(name: &str, magics: impl Iterator<Item = &'a Magic>) {
    println!("const {}_MAGICS: [u64; {}] = [", name, Square::COUNT);
    for (sq, magic) in Square::iter().zip(magics) {
        println!("    0x{:016x}, // {} ({} bits)", magic.magic(), sq, magic.index_bits());
    }
    println!("];");
}
