use echoclean::{Row, RulesetBuilder};

fn main() {
    let ruleset = RulesetBuilder::new()
        .result_column("species")
        .result_column("confidence")
        .rule(
            Row::new()
                .set("HiF", ">45")
                .set("Species", "myoluc")
                .set("species", "Myoluc")
                .set("confidence", "high"),
        )
        .rule(
            Row::new()
                .set("HiF", "25-45")
                .set("Species", "not blank")
                .set("species", "Eptfus")
                .set("confidence", "medium"),
        )
        .rule(
            Row::new()
                .set("HiF", "")
                .set("Species", "")
                .set("species", "unknown")
                .set("confidence", "low"),
        )
        .build()
        .expect("failed to build ruleset");

    let row = Row::new().set("HiF", 30_i64).set("Species", "Lasnoc");

    let report = ruleset
        .test_detailed(&row)
        .expect("row supplies every criteria column");

    println!("{report}");
    println!();
    println!("Criteria columns: {:?}", ruleset.criteria_columns());
    println!("Matched rule: {:?}", report.matched_rule());
    println!("Result: {:?}", report.result());
    println!("Rules tested: {}", report.rules_tested());
    println!("Duration: {:?}", report.duration());
}
