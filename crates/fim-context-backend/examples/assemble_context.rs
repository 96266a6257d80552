//! Context assembly example
//!
//! Decodes a cursor context as it arrives over the wire and prints the FIM block.

use fim_context::CursorContext;
use fim_context_backend::{ContextAssembler, assemble};

fn main() {
    let json = r#"{
        "line": 2,
        "column": 11,
        "prefix": "def add(a, b):\n    return a",
        "suffix": "\n",
        "language": "python",
        "selections": [],
        "recentEdits": [
            { "timestamp": 1000, "from": 15, "to": 15, "insert": "    ", "remove": "" },
            { "timestamp": 1200, "from": 19, "to": 19, "insert": "return a", "remove": "" }
        ]
    }"#;

    println!("--- before any context ---");
    println!("{}\n", assemble(None));

    let context = CursorContext::from_json(json).unwrap();
    println!("--- default assembler ---");
    println!("{}\n", assemble(Some(&context)));

    println!("--- one recent edit ---");
    println!("{}", ContextAssembler::new(1).assemble(Some(&context)));
}
