use echoclean::{Criterion, Row, Ruleset, Value};

fn criterion(cell: impl Into<Value>) -> Criterion {
    Criterion::parse(&cell.into(), "col").unwrap()
}

fn check(c: &Criterion, candidate: impl Into<Value>) -> bool {
    let candidate: Value = candidate.into();
    c.test(&candidate.normalized()).unwrap()
}

fn text(values: &[&str]) -> Option<Vec<Value>> {
    Some(values.iter().map(|v| Value::from(*v)).collect())
}

#[test]
fn blank_matches_only_empty_markers() {
    let c = criterion("blank");
    assert!(check(&c, Value::Empty));
    assert!(check(&c, ""));
    assert!(check(&c, "blank"));
    assert!(check(&c, "BLANK"));
    assert!(!check(&c, "x"));
    assert!(!check(&c, 0_i64));
}

#[test]
fn any_rejects_blank() {
    let c = criterion("any");
    assert!(check(&c, "foo"));
    assert!(check(&c, 12_i64));
    assert!(!check(&c, Value::Empty));
    assert!(!check(&c, ""));

    let c = criterion("any including blank");
    assert!(check(&c, Value::Empty));
    assert!(check(&c, "foo"));
}

#[test]
fn empty_rule_cell_matches_everything() {
    let c = criterion(Value::Empty);
    assert!(check(&c, Value::Empty));
    assert!(check(&c, "foo"));
    assert!(check(&c, 3.5));
}

#[test]
fn numeric_range_is_inclusive() {
    let c = criterion("3-6");
    assert!(check(&c, 5_i64));
    assert!(!check(&c, 2.5));
    assert!(check(&c, 6_i64));
    assert!(check(&c, 3_i64));
    assert!(!check(&c, 6.01));
}

#[test]
fn comparators() {
    assert!(check(&criterion("<1"), 0_i64));
    assert!(check(&criterion("<=1"), 1_i64));
    assert!(!check(&criterion(">10"), 10_i64));
    assert!(check(&criterion(">=10"), 10_i64));
    assert!(check(&criterion(2_i64), 2_i64));
    assert!(!check(&criterion(2_i64), 2.5));
}

#[test]
fn numbers_compare_against_numeric_text() {
    let c = criterion(">= 20.5");
    assert!(check(&c, "21"));
    assert!(!check(&c, " 20.4 "));
}

#[test]
fn token_sets() {
    let c = criterion("foo, bar");
    assert!(check(&c, "foo"));
    assert!(check(&c, "BAR"));
    assert!(!check(&c, "baz"));

    let c = criterion("this, that, or blank");
    assert!(check(&c, ""));
    assert!(check(&c, "that"));
    assert!(!check(&c, "other"));
}

#[test]
fn negated_tokens() {
    let c = criterion("not something");
    assert!(!check(&c, "something"));
    assert!(check(&c, "anything else"));
    assert!(check(&c, ""));

    let c = criterion("not blank");
    assert!(!check(&c, ""));
    assert!(!check(&c, Value::Empty));
    assert!(check(&c, "x"));
}

#[test]
fn blank_equivalence() {
    let cells: [Value; 7] = [
        Value::Empty,
        "blank".into(),
        "any".into(),
        "any including blank".into(),
        ">3".into(),
        "foo, or blank".into(),
        "not foo".into(),
    ];
    for cell in cells {
        let c = criterion(cell);
        let expected = check(&c, Value::Empty);
        assert_eq!(check(&c, ""), expected, "{c}");
        assert_eq!(check(&c, " "), expected, "{c}");
    }
}

#[test]
fn end_to_end() {
    let ruleset = Ruleset::build(
        vec![
            Row::new().set("foo", "one").set("ret", "one"),
            Row::new().set("foo", "foo, bar").set("ret", "foo,bar"),
        ],
        &["ret"],
    )
    .unwrap();

    assert_eq!(ruleset.test(&Row::new().set("foo", "one")).unwrap(), text(&["one"]));
    assert_eq!(ruleset.test(&Row::new().set("foo", "bar")).unwrap(), text(&["foo,bar"]));
    assert_eq!(ruleset.test(&Row::new().set("foo", "nope")).unwrap(), None);
}

#[test]
fn compound_rule() {
    let ruleset = Ruleset::build(
        vec![Row::new().set("foo", "one").set("bar", ">2").set("ret", "one and >2")],
        &["ret"],
    )
    .unwrap();

    let hit = Row::new().set("foo", "one").set("bar", 3_i64);
    assert_eq!(ruleset.test(&hit).unwrap(), text(&["one and >2"]));
    assert_eq!(ruleset.test(&Row::new().set("foo", "one").set("bar", 2_i64)).unwrap(), None);
    assert_eq!(ruleset.test(&Row::new().set("foo", "two").set("bar", 3_i64)).unwrap(), None);
}

#[test]
fn first_match_wins() {
    let ruleset = Ruleset::build(
        vec![
            Row::new().set("HiF", ">40").set("species", "high"),
            Row::new().set("HiF", ">20").set("species", "mid"),
            Row::new().set("HiF", "").set("species", "any"),
        ],
        &["species"],
    )
    .unwrap();

    assert_eq!(ruleset.test(&Row::new().set("HiF", 50_i64)).unwrap(), text(&["high"]));
    assert_eq!(ruleset.test(&Row::new().set("HiF", 30_i64)).unwrap(), text(&["mid"]));
    assert_eq!(ruleset.test(&Row::new().set("HiF", 10_i64)).unwrap(), text(&["any"]));

    let report = ruleset.test_detailed(&Row::new().set("HiF", 30_i64)).unwrap();
    assert_eq!(report.matched_rule(), Some(1));
    assert_eq!(report.rules_tested(), 2);
}

#[test]
fn multiple_result_columns_keep_declared_order() {
    let ruleset = Ruleset::build(
        vec![Row::new()
            .set("qual", "good")
            .set("species", "Myoluc")
            .set("confidence", "high")],
        &["confidence", "species"],
    )
    .unwrap();

    assert_eq!(
        ruleset.test(&Row::new().set("qual", "Good")).unwrap(),
        text(&["high", "Myoluc"])
    );
}

#[test]
fn zero_result_columns_still_distinguish_match() {
    let ruleset = Ruleset::build(vec![Row::new().set("foo", "one")], &[] as &[&str]).unwrap();
    assert_eq!(ruleset.test(&Row::new().set("foo", "one")).unwrap(), Some(vec![]));
    assert_eq!(ruleset.test(&Row::new().set("foo", "two")).unwrap(), None);
}

#[test]
fn idempotent_and_row_untouched() {
    let ruleset = Ruleset::build(
        vec![Row::new().set("foo", "Bar").set("ret", "Result")],
        &["ret"],
    )
    .unwrap();
    let row = Row::new().set("foo", "  BAR ");
    let before = row.clone();

    let first = ruleset.test(&row).unwrap();
    for _ in 0..5 {
        assert_eq!(ruleset.test(&row).unwrap(), first);
    }
    assert_eq!(first, text(&["Result"]));
    assert_eq!(row, before);
}
