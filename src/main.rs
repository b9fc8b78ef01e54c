//! The stockpig command line: perft counts and game-tree searches.
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
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use log::{info, error};
use simplelog::{WriteLogger, LevelFilter, Config};
use chess::{Position, variations};
use chess::position::START_FEN;
use stockpig::{Algorithm, Material, Search, SearchConfig};

fn main() -> Result<(), Error> {
    let matches =
        App::new("stockpig")
            .version(crate_version!())
            .about("A bitboard chess rules engine with a game-tree search")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("stockpig.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Reads search settings from a YAML file instead of ~/.stockpig/config.yaml"))
            .subcommand(SubCommand::with_name("perft")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("divide")
                    .long("divide")
                    .help("Prints the count following each legal move"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("search")
                .about("Searches a position for the best move. Defaults to the standard \
                        starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .help("Nominal depth of the search in plies"))
                .arg(Arg::with_name("quiescence")
                    .long("quiescence")
                    .short("q")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .help("Plies a quiescence search may go past the nominal depth"))
                .arg(Arg::with_name("algorithm")
                    .long("algorithm")
                    .short("a")
                    .value_name("ALGORITHM")
                    .takes_value(true)
                    .possible_values(&["minimax", "alphabeta", "alpha-beta", "quiescence"])
                    .help("The search to run"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    let result = match matches.subcommand() {
        ("perft", Some(matches)) => perft(matches),
        ("search", Some(matches)) => search(matches),
        _ => unreachable!(),
    };

    if let Err(err) = &result {
        error!("{}", err);
    }
    result
}

fn perft(matches: &ArgMatches) -> Result<(), Error> {
    let depth = parse_number(matches, "depth")?.expect("INFALLIBLE");

    println!();
    for fen in matches.values_of("fen").expect("INFALLIBLE") {
        let mut pos: Position = fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))?;
        info!("perft {} to depth {}", fen, depth);
        println!("{}", fen);

        let start = Instant::now();
        let count = if matches.is_present("divide") {
            variations::print(&mut pos, depth)
        } else {
            variations::count(&mut pos, depth)
        };
        let time = start.elapsed();

        println!("Depth {} total:\t{:12}\n", depth, count);
        info!("{} nodes in {:.3}s", count, time.as_secs_f64());
    }

    Ok(())
}

fn search(matches: &ArgMatches) -> Result<(), Error> {
    let mut config = SearchConfig::load(matches.value_of_os("config").map(std::path::Path::new))
        .map_err(|err| Error(err.to_string()))?;
    if let Some(depth) = parse_number(matches, "depth")? {
        config.depth = depth;
    }
    if let Some(depth) = parse_number(matches, "quiescence")? {
        config.quiescence_depth = depth;
    }
    if let Some(algorithm) = matches.value_of("algorithm") {
        config.algorithm = algorithm.parse::<Algorithm>().map_err(|err| Error(err.to_string()))?;
    }

    let fen = matches.value_of("fen").expect("INFALLIBLE");
    let mut pos: Position = fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))?;
    info!("searching {} with {:?}", fen, config);

    let start = Instant::now();
    let result = Search::new().run(&config, &mut pos, &Material);
    let time = start.elapsed();

    match result.best_move {
        Some(mv) => println!("best move: {}", mv),
        None => match pos.termination() {
            Some(reason) => println!("game over: {}", reason),
            None => println!("best move: none"),
        },
    }
    println!("score: {}", result.score);
    println!("nodes: {}", result.nodes);
    println!("time: {:.3}s", time.as_secs_f64());

    Ok(())
}

/// Parses an optional numeric argument
fn parse_number(matches: &ArgMatches, name: &str) -> Result<Option<usize>, Error> {
    match matches.value_of(name) {
        Some(s) => s.parse()
            .map(Some)
            .map_err(|_| Error(format!("{} must be numeric", name))),
        None => Ok(None),
    }
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }
