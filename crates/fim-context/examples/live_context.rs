//! Live context example
//!
//! Simulates a typing burst against a `TrackedEditor` and prints every context the debounced
//! emitter delivers.

use fim_context::{ManualClock, SelectionRange, TrackedEditor, TrackerConfig};

fn main() {
    println!("=== Live cursor context ===\n");

    let clock = ManualClock::new(0);
    let config = TrackerConfig {
        quiet_interval_ms: 100,
        ..TrackerConfig::default()
    };
    let mut editor =
        TrackedEditor::with_clock("fn main() {\n    \n}", "rust", config, clock.clone());
    editor.on_context(|context| {
        println!(
            "delivered: line {} column {} ({} recent edits)",
            context.line,
            context.column,
            context.recent_edits.len()
        );
        println!("  prefix: {:?}", context.prefix);
        println!("  suffix: {:?}", context.suffix);
    });

    // 1. Type a statement one character at a time, 30 ms apart.
    println!("1. Typing burst:");
    let mut offset = 16;
    editor.set_cursor(offset).unwrap();
    for ch in "let x = 1;".chars() {
        editor.insert(offset, &ch.to_string()).unwrap();
        offset += 1;
        clock.advance(30);
        editor.poll();
    }
    // Nothing was delivered during the burst; go quiet.
    clock.advance(100);
    editor.poll();

    // 2. Select the binding name together with a second caret.
    println!("\n2. Multi-selection:");
    editor
        .set_selections(vec![SelectionRange::new(20, 21), SelectionRange::cursor(0)], 0)
        .unwrap();
    clock.advance(100);
    editor.poll();

    println!("\nFinal text:\n{}", editor.document().text());
}
