use chrono::NaiveDate;
use lab_draw::{ContractExpiry, EligibilityEvaluator, Roster, RosterEntry, TaskLabel};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build_roster() -> Roster {
    let tasks = vec![
        TaskLabel::new("Sous - sol", "Autoclave"),
        TaskLabel::new("RDC", "Waste"),
    ];
    let entries = vec![
        RosterEntry::new("Zoe", ContractExpiry::until(d(2024, 3, 1)))
            .with_opt_in("Sous - sol - Autoclave")
            .with_opt_in("RDC - Waste"),
        RosterEntry::new("Adam", ContractExpiry::NeverExpires).with_opt_in("RDC - Waste"),
        RosterEntry::new("Mia", ContractExpiry::until(d(2030, 1, 1)))
            .with_opt_in("Sous - sol - Autoclave"),
    ];
    Roster::new(tasks, entries).unwrap()
}

#[test]
fn eligible_requires_opt_in_and_active_contract() {
    let roster = build_roster();
    let evaluator = EligibilityEvaluator::new(&roster);

    assert_eq!(
        evaluator.eligible("Sous - sol - Autoclave", d(2024, 2, 26)),
        vec!["Zoe".to_string(), "Mia".to_string()]
    );
    assert_eq!(
        evaluator.eligible("Sous - sol - Autoclave", d(2024, 3, 4)),
        vec!["Mia".to_string()]
    );
    assert_eq!(
        evaluator.eligible("RDC - Waste", d(2024, 3, 4)),
        vec!["Adam".to_string()]
    );
}

#[test]
fn expiry_on_anchor_date_is_still_eligible() {
    let roster = build_roster();
    let evaluator = EligibilityEvaluator::new(&roster);
    assert!(evaluator.is_eligible("Zoe", "RDC - Waste", d(2024, 3, 1)));
    assert!(!evaluator.is_eligible("Zoe", "RDC - Waste", d(2024, 3, 2)));
}

#[test]
fn unknown_task_or_person_is_never_eligible() {
    let roster = build_roster();
    let evaluator = EligibilityEvaluator::new(&roster);
    assert!(evaluator.eligible("Nowhere", d(2024, 1, 1)).is_empty());
    assert!(!evaluator.is_eligible("Ghost", "RDC - Waste", d(2024, 1, 1)));
}

#[test]
fn unreadable_expiry_fails_open() {
    let expiry = ContractExpiry::parse("31/12/2023").into_expiry();
    let tasks = vec![TaskLabel::category_only("T1")];
    let entries = vec![RosterEntry::new("Typo", expiry).with_opt_in("T1")];
    let roster = Roster::new(tasks, entries).unwrap();
    let evaluator = EligibilityEvaluator::new(&roster);

    assert_eq!(expiry, ContractExpiry::NeverExpires);
    assert_eq!(evaluator.eligible("T1", d(2099, 12, 28)), vec!["Typo".to_string()]);
}
