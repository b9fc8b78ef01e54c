//! Game-tree search for the `chess` rules engine
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! [`search`](search/index.html) holds the game-independent minimax, alpha-beta and quiescence
//! searches, [`eval`](eval/index.html) the material evaluator for chess, and
//! [`config`](config/index.html) the settings a search runs with.
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::option_unwrap_used, clippy::result_unwrap_used)]

pub mod search;
pub mod eval;
pub mod config;

pub use search::{GameState, Evaluator, Score, Search, SearchResult};
pub use eval::Material;
pub use config::{Algorithm, SearchConfig};
