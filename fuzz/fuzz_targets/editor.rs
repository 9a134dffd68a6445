//! Schema editor state machine fuzzer.
//!
//! Replays arbitrary edit sequences and compares the editor with a model of
//! its working copy after every step.

use datafactory_schema::Dialect;
use datafactory_schema::testing::{EditOp, check_editor_ops};
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|input: (Dialect, Vec<EditOp>)| {
            let (dialect, ops) = input;
            check_editor_ops(dialect, &ops);
        });
    }
}
