use echoclean::{Row, RulesetBuilder};

fn main() {
    // Define rules; `species` is emitted by the first rule that matches
    let ruleset = RulesetBuilder::new()
        .result_column("species")
        .rule(
            Row::new()
                .set("HiF", ">45")
                .set("Qual", "good, fair")
                .set("species", "Myoluc"),
        )
        .rule(
            Row::new()
                .set("HiF", "25-45")
                .set("Qual", "any")
                .set("species", "Eptfus"),
        )
        .rule(
            Row::new()
                .set("HiF", "")
                .set("Qual", "blank")
                .set("species", "noise"),
        )
        .build()
        .expect("failed to build ruleset");

    println!("{ruleset}");

    // Classify a data row
    let row = Row::new().set("HiF", "38.5").set("Qual", "Poor");

    match ruleset.test(&row) {
        Ok(Some(result)) => println!("Result: {result:?}"),
        Ok(None) => println!("No rule matched."),
        Err(e) => println!("Could not classify: {e}"),
    }
}
