//! Property tests over random operation sequences.

use gendeque::{GenDeque, Severity};
use gendeque_test_utils::DropLedger;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    PushBack,
    PushFront,
    PopBack,
    PopFront,
    TakeCursor,
    DropCursor,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::PushBack),
        3 => Just(Step::PushFront),
        2 => Just(Step::PopBack),
        2 => Just(Step::PopFront),
        1 => Just(Step::TakeCursor),
        1 => Just(Step::DropCursor),
    ]
}

proptest! {
    #[test]
    fn live_elements_track_length(
        steps in proptest::collection::vec(arb_step(), 0..300),
        initial in 1usize..16,
    ) {
        let ledger = DropLedger::new();
        let mut d = GenDeque::with_capacity(initial);
        let mut held = Vec::new();
        let mut next = 0i64;
        for step in steps {
            match step {
                Step::PushBack => { d.push_back(ledger.mint(next)); next += 1; }
                Step::PushFront => { d.push_front(ledger.mint(next)); next += 1; }
                Step::PopBack => { let _ = d.pop_back(); }
                Step::PopFront => { let _ = d.pop_front(); }
                Step::TakeCursor => held.push(d.cbegin()),
                Step::DropCursor => { held.pop(); }
            }
            prop_assert_eq!(ledger.live(), d.len());
            prop_assert_eq!(d.cursor_refs(), held.iter().filter(|c| !c.is_retired()).count());
        }
        let current: Vec<bool> = held.iter().map(|c| !c.is_retired()).collect();
        drop(d);
        prop_assert_eq!(ledger.live(), 0);
        for (c, was_current) in held.iter().zip(current) {
            let severity = c.check().unwrap_err().severity();
            if was_current {
                prop_assert_eq!(severity, Some(Severity::Severe));
            } else {
                prop_assert!(severity.is_some());
            }
        }
    }

    #[test]
    fn versions_never_decrease(steps in proptest::collection::vec(arb_step(), 0..200)) {
        let mut d = GenDeque::new();
        let mut held = Vec::new();
        let mut last = d.version();
        for step in steps {
            match step {
                Step::PushBack => d.push_back(0u8),
                Step::PushFront => d.push_front(0u8),
                Step::PopBack => { let _ = d.pop_back(); }
                Step::PopFront => { let _ = d.pop_front(); }
                Step::TakeCursor => held.push(d.cbegin()),
                Step::DropCursor => { held.pop(); }
            }
            prop_assert!(d.version() >= last);
            last = d.version();
        }
    }
}
