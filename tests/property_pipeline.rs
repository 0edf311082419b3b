//! Property tests over classification scores, the confidence pipeline,
//! and the monotone adaptation state.

use proptest::prelude::*;

use noesis::domain::models::{
    CapabilityStore, Session, Specialization, StrategySet, TaskContext, TaskInput,
};
use noesis::domain::ports::FixedScoreSource;
use noesis::services::{Classifier, Pipeline};

fn specialization_strategy() -> impl Strategy<Value = Specialization> {
    prop_oneof![
        Just(Specialization::Reasoning),
        Just(Specialization::Learning),
        Just(Specialization::Creative),
    ]
}

fn text_input_strategy() -> impl Strategy<Value = TaskInput> {
    "[a-z][a-z ,.]{0,120}".prop_map(TaskInput::from)
}

fn sequence_input_strategy() -> impl Strategy<Value = TaskInput> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,12}".prop_map(TaskInput::Text),
            "[a-z]{1,12}".prop_map(TaskInput::Action),
            prop::collection::vec("[a-z]{1,8}".prop_map(TaskInput::Text), 1..4)
                .prop_map(TaskInput::Sequence),
        ],
        1..24,
    )
    .prop_map(TaskInput::Sequence)
}

fn input_strategy() -> impl Strategy<Value = TaskInput> {
    prop_oneof![text_input_strategy(), sequence_input_strategy()]
}

proptest! {
    /// Complexity and priority land in [0, 1] for any input shape.
    #[test]
    fn prop_scores_bounded(
        spec in specialization_strategy(),
        input in input_strategy(),
        urgency in 0.0f64..=1.0,
        importance in 0.0f64..=1.0,
    ) {
        let classifier = Classifier::new(spec.profile());
        let context = TaskContext::default()
            .with_factor("urgency", urgency)
            .with_factor("importance", importance);

        let complexity = classifier.complexity(&input);
        prop_assert!((0.0..=1.0).contains(&complexity));

        let priority = classifier.priority(&input, &context);
        prop_assert!((0.0..=1.0).contains(&priority));
    }

    /// Every run appends exactly five step records, stages 1 through 5
    /// in order, and the final confidence is the clamped product.
    #[test]
    fn prop_pipeline_shape_and_product(
        spec in specialization_strategy(),
        input in input_strategy(),
        score in 0.0f64..1.0,
    ) {
        let classifier = Classifier::new(spec.profile());
        let task = match classifier.build_task(input, TaskContext::default()) {
            Ok(task) => task,
            // Whitespace-only text is rejected upstream; nothing to run.
            Err(_) => return Ok(()),
        };

        let scores = FixedScoreSource::constant(score);
        let pipeline = Pipeline::new(spec.profile(), &scores);
        let mut session = Session::open(task.id);
        let run = pipeline.run(&task, &mut session);

        let indices: Vec<u8> = session.steps.iter().map(|s| s.stage.index()).collect();
        prop_assert_eq!(indices, vec![1, 2, 3, 4, 5]);

        let product: f64 = session.steps.iter().map(|s| s.confidence).product();
        prop_assert!((run.confidence - product.clamp(0.1, 1.0)).abs() < 1e-9);
        prop_assert!((0.1..=1.0).contains(&run.confidence));
    }

    /// The running product never increases as stages accumulate.
    #[test]
    fn prop_running_product_non_increasing(
        spec in specialization_strategy(),
        input in input_strategy(),
    ) {
        let classifier = Classifier::new(spec.profile());
        let task = match classifier.build_task(input, TaskContext::default()) {
            Ok(task) => task,
            Err(_) => return Ok(()),
        };

        let scores = FixedScoreSource::constant(0.5);
        let pipeline = Pipeline::new(spec.profile(), &scores);
        let mut session = Session::open(task.id);
        pipeline.run(&task, &mut session);

        let mut running = 1.0f64;
        for step in &session.steps {
            let next = running * step.confidence;
            prop_assert!(next <= running + 1e-12);
            running = next;
        }
    }

    /// Repeated raises converge capability levels to exactly 1.0 and
    /// never beyond.
    #[test]
    fn prop_capability_levels_converge(
        start in 0.0f64..=1.0,
        raises in 0usize..30,
    ) {
        let mut store = CapabilityStore::seeded(&[("focus", start)]);
        for _ in 0..raises {
            let (before, after) = store.raise("focus");
            prop_assert!(after >= before);
            prop_assert!(after <= 1.0);
            prop_assert!(after - before <= 0.1 + 1e-12);
        }
        if raises >= 10 {
            prop_assert!((store.level("focus") - 1.0).abs() < 1e-9);
        }
    }

    /// Strategy sets only grow, and adoption is idempotent.
    #[test]
    fn prop_strategy_set_monotone(
        names in prop::collection::vec("[a-z_]{1,16}", 0..20),
    ) {
        let mut set = StrategySet::seeded(&[]);
        let mut last_len = 0;
        for name in &names {
            let newly = set.adopt(name);
            prop_assert!(set.len() >= last_len);
            prop_assert!(set.contains(name));
            // A second adoption of the same name reports nothing new.
            prop_assert!(!set.adopt(name));
            let _ = newly;
            last_len = set.len();
        }
    }
}
