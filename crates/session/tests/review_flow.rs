use pretty_assertions::assert_eq;
use proptest::prelude::*;
use review_record::{flatten, Field};
use review_schema::{analyze, Schema};
use review_session::{AdvancePolicy, ReviewSession};
use serde_json::json;

#[test]
fn approving_every_field_is_independent_of_completeness() {
    let record = json!({
        "product_name": "Acme CRM",
        "company_name": "Acme",
        "pricing": {"overview": "Per seat", "pricing_url": "https://acme.test/pricing"},
        "pricing_overview": "dup",
        "features": [{"name": "Pipelines"}],
        "is_active": true
    });
    let fields = flatten(&record);
    assert_eq!(
        fields.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(),
        vec![
            "product_name",
            "company_name",
            "pricing.overview",
            "pricing.pricing_url",
            "features",
            "is_active"
        ]
    );

    let report = analyze(&record, &Schema::product_snapshot().unwrap());
    assert!(report.percentage < 100);

    let mut session = ReviewSession::new(fields, AdvancePolicy::NextUnreviewed);
    while session.approve() {}
    assert_eq!(session.progress(), 100);
    assert_eq!(session.approved_count(), 6);
}

fn corpus(len: usize) -> Vec<Field> {
    (0..len)
        .map(|i| Field::new(format!("f{i}"), format!("F{i}"), json!(i)))
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Approve,
    Next,
    Previous,
    Jump(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Approve),
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..12).prop_map(Op::Jump),
    ]
}

proptest! {
    #[test]
    fn approvals_only_grow_and_pointer_stays_in_range(
        len in 1usize..10,
        ops in prop::collection::vec(op(), 0..60),
        increment in any::<bool>(),
    ) {
        let policy = if increment { AdvancePolicy::Increment } else { AdvancePolicy::NextUnreviewed };
        let mut session = ReviewSession::new(corpus(len), policy);
        let mut approved = 0;
        let mut progress = 0;

        for op in ops {
            match op {
                Op::Approve => { session.approve(); }
                Op::Next => { session.next(); }
                Op::Previous => { session.previous(); }
                Op::Jump(index) => { session.jump_to(index); }
            }
            prop_assert!(session.approved_count() >= approved);
            prop_assert!(session.progress() >= progress);
            approved = session.approved_count();
            progress = session.progress();

            let current = session.current_index();
            prop_assert!(current.is_some_and(|i| i < len));
            prop_assert!(session.progress() <= 100);
        }
    }

    #[test]
    fn boundary_moves_are_no_ops(len in 1usize..10) {
        let mut session = ReviewSession::new(corpus(len), AdvancePolicy::default());
        prop_assert!(!session.previous());
        prop_assert_eq!(session.current_index(), Some(0));

        session.jump_to(len - 1);
        prop_assert!(!session.next());
        prop_assert_eq!(session.current_index(), Some(len - 1));
    }
}
