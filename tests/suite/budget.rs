//! Step budget and nesting limit tests

use moebius_engine::{
    EvalSettings, Evaluator, Event, ExactError, NestingLimit, StepBudget, Strategy, ee, emul, epi,
    esqrtrat, esqrtspos,
};

use crate::common::render_quiet;

#[test]
fn exhausted_budget_is_reported() {
    let settings = EvalSettings::default().with_steps(StepBudget::limited(10));
    let err = render_quiet(epi(), 10, &settings).unwrap_err();
    assert!(matches!(err, ExactError::UnresolvedWithinBudget { steps: 10, .. }));
}

#[test]
fn sufficient_budget_renders() {
    let settings = EvalSettings::default().with_steps(StepBudget::limited(100));
    assert_eq!(
        render_quiet(epi(), 10, &settings).unwrap(),
        "03141592653e1"
    );
    let settings = EvalSettings::default().with_steps(StepBudget::limited(10));
    assert_eq!(render_quiet(ee(), 10, &settings).unwrap(), "027182818284e1");
}

#[test]
fn nesting_limit_bounds_lookahead() {
    let fourth_root = || esqrtspos(esqrtrat(2, 1).unwrap());

    let shallow = EvalSettings::default().with_nesting(NestingLimit::new(2));
    let err = render_quiet(fourth_root(), 5, &shallow).unwrap_err();
    assert!(matches!(err, ExactError::UnresolvedWithinBudget { depth: 3, .. }));

    let enough = EvalSettings::default().with_nesting(NestingLimit::new(3));
    assert_eq!(render_quiet(fourth_root(), 5, &enough).unwrap(), "0118921e1");
}

#[test]
fn tensor_argument_triggers_lookahead() {
    let mut sink: Vec<Event> = Vec::new();
    let mut evaluator = Evaluator::new(&EvalSettings::default(), &mut sink);
    evaluator.sign_emission(emul(ee(), epi()), 4).unwrap();
    assert!(sink.contains(&Event::Lookahead { depth: 1 }));
    assert!(!sink.iter().any(|event| matches!(event, Event::Lookahead { depth: 2 })));
}

#[test]
fn strategies_agree_on_digits() {
    for strategy in [Strategy::Fair, Strategy::Refine, Strategy::Overlap] {
        let settings = EvalSettings::default().with_strategy(strategy);
        let rendered = render_quiet(emul(ee(), epi()), 5, &settings).unwrap();
        assert_eq!(rendered, "085397e1", "{}", strategy.as_str());
    }
}
