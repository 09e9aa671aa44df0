#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `StopBatch` using rstest-bdd.

use std::cell::RefCell;
use std::time::Instant;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use routewise_core::batch::NewStop;
use routewise_core::{BatchConfig, BatchError, BatchOutcome, Priority, RouteOptimizer, StopBatch};

const CORNERS: [NewStop; 4] = [
    NewStop::new(Priority::Start, 0.0, 0.0),
    NewStop::new(Priority::Normal, 0.0, 1.0),
    NewStop::new(Priority::High, 1.0, 1.0),
    NewStop::new(Priority::Normal, 1.0, 0.0),
];

#[derive(Debug)]
struct BatchWorld {
    batch: RefCell<StopBatch>,
    optimizer: RouteOptimizer,
    now: Instant,
    last: RefCell<Option<Result<BatchOutcome, BatchError>>>,
}

impl BatchWorld {
    fn add(&self, stop: NewStop) {
        let outcome = self.batch.borrow_mut().add(&self.optimizer, stop, self.now);
        self.last.replace(Some(outcome));
    }
}

#[fixture]
fn world() -> BatchWorld {
    BatchWorld {
        batch: RefCell::new(StopBatch::new(BatchConfig::default())),
        optimizer: RouteOptimizer::default(),
        now: Instant::now(),
        last: RefCell::new(None),
    }
}

#[given("an empty batch")]
fn given_empty(world: &BatchWorld) {
    assert!(world.batch.borrow().is_empty());
}

#[when("three distinct stops are added")]
fn when_three(world: &BatchWorld) {
    for stop in CORNERS.iter().take(3) {
        world.add(*stop);
    }
}

#[when("a fourth distinct stop is added")]
fn when_fourth(world: &BatchWorld) {
    let [.., fourth] = CORNERS;
    world.add(fourth);
}

#[when("the first stop is added again")]
fn when_repeat(world: &BatchWorld) {
    let [first, ..] = CORNERS;
    world.add(NewStop {
        priority: Priority::Normal,
        ..first
    });
}

#[then("the batch is pending with 3 stops")]
fn then_pending(world: &BatchWorld) {
    assert_eq!(world.batch.borrow().len(), 3);
    assert!(matches!(
        world.last.borrow().as_ref(),
        Some(Ok(BatchOutcome::Pending { held: 3 }) | Err(_))
    ));
}

#[then("a five stop route is returned")]
fn then_route(world: &BatchWorld) {
    let borrowed = world.last.borrow();
    let Some(Ok(BatchOutcome::Optimized(route))) = borrowed.as_ref() else {
        panic!("expected an optimized route, got {borrowed:?}");
    };
    assert_eq!(route.stops().len(), 5);
    assert_eq!(route.stops().first(), route.stops().last());
}

#[then("the batch is empty")]
fn then_empty(world: &BatchWorld) {
    assert!(world.batch.borrow().is_empty());
}

#[then("the stop is refused as a duplicate")]
fn then_duplicate(world: &BatchWorld) {
    let borrowed = world.last.borrow();
    let error = borrowed
        .as_ref()
        .expect("a stop should have been added")
        .as_ref()
        .expect_err("duplicate should be refused");
    assert!(matches!(error, BatchError::DuplicateLocation { .. }));
}

#[scenario(path = "tests/features/stop_batch.feature", index = 0)]
fn fourth_stop_completes(world: BatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/stop_batch.feature", index = 1)]
fn repeated_position_refused(world: BatchWorld) {
    let _ = world;
}
