use std::sync::Arc;
use std::thread;

use echoclean::{Row, RulesetBuilder};

fn main() {
    let ruleset = Arc::new(
        RulesetBuilder::new()
            .result_column("species")
            .rule(Row::new().set("HiF", ">=40").set("species", "Myoluc"))
            .rule(Row::new().set("HiF", "any").set("species", "Eptfus"))
            .build()
            .expect("failed to build ruleset"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                let row = Row::new().set("HiF", 30_i64 + 5 * i64::from(i));
                let result = rs.test(&row);
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
