//! Parser invariant fuzzer.
//!
//! Feeds arbitrary text through every parser configuration and checks that
//! parsing is total, deterministic and consistent across split strategies.

use datafactory_schema::testing::check_parse_invariants;
use datafactory_schema::{Dialect, ParseOptions};
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|input: (Dialect, ParseOptions, String)| {
            let (dialect, options, ddl) = input;
            check_parse_invariants(dialect, options, &ddl);
        });
    }
}
