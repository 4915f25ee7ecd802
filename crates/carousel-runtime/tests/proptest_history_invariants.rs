#![forbid(unsafe_code)]

//! Property tests for [`HistoryState`] invariants.
//!
//! Validates:
//! - N commits then N undos restore the initial value.
//! - Redo right after undo restores the exact pre-undo present.
//! - Live replaces never change stack lengths.
//! - Random op sequences match a plain-`Vec` reference model.
//! - Depth limits are never exceeded.
//! - Undo/redo availability depends only on the stacks, live or not.
//! - Live-only values never reach `past` or `future`.

use proptest::prelude::*;

use carousel_runtime::undo::{HistoryConfig, HistoryState};

// ============================================================================
// Strategy helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Commit(i64),
    Live(i64),
    Settle,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i64>().prop_map(Op::Commit),
        3 => any::<i64>().prop_map(Op::Live),
        1 => Just(Op::Settle),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

// ============================================================================
// Reference model
// ============================================================================

#[derive(Debug, Clone)]
struct Model {
    past: Vec<i64>,
    present: i64,
    /// Last committed present while `present` is live.
    anchor: Option<i64>,
    /// Nearest redo first.
    future: Vec<i64>,
    max_depth: usize,
}

impl Model {
    fn new(initial: i64, max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            anchor: None,
            future: Vec::new(),
            max_depth,
        }
    }

    fn commit(&mut self, value: i64) {
        let base = self.anchor.take().unwrap_or(self.present);
        self.past.push(base);
        self.present = value;
        self.future.clear();
        self.trim();
    }

    fn live(&mut self, value: i64) {
        if self.anchor.is_none() {
            self.anchor = Some(self.present);
        }
        self.present = value;
    }

    fn settle(&mut self) {
        if self.anchor.is_some() {
            self.commit(self.present);
        }
    }

    /// Install `next` and return the last committed present.
    fn swap_present(&mut self, next: i64) -> i64 {
        let current = std::mem::replace(&mut self.present, next);
        self.anchor.take().unwrap_or(current)
    }

    fn undo(&mut self) {
        if let Some(prev) = self.past.pop() {
            let current = self.swap_present(prev);
            self.future.insert(0, current);
        }
    }

    fn redo(&mut self) {
        if self.future.is_empty() {
            return;
        }
        let next = self.future.remove(0);
        let current = self.swap_present(next);
        self.past.push(current);
        self.trim();
    }

    fn trim(&mut self) {
        while self.past.len() > self.max_depth {
            self.past.remove(0);
        }
    }
}

fn apply(history: &mut HistoryState<i64>, model: &mut Model, op: &Op) {
    match *op {
        Op::Commit(v) => {
            history.replace(v, true);
            model.commit(v);
        }
        Op::Live(v) => {
            history.replace(v, false);
            model.live(v);
        }
        Op::Settle => {
            history.settle();
            model.settle();
        }
        Op::Undo => {
            history.undo();
            model.undo();
        }
        Op::Redo => {
            history.redo();
            model.redo();
        }
    }
}

// ============================================================================
// Invariant 1: N commits then N undos restore the initial value
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn commits_then_undos_restore_initial(
        initial in any::<i64>(),
        values in prop::collection::vec(any::<i64>(), 1..50)
    ) {
        let mut history = HistoryState::new(initial);
        for v in &values {
            history.replace(*v, true);
        }
        for _ in &values {
            prop_assert!(history.undo());
        }
        prop_assert_eq!(*history.present(), initial);
        prop_assert!(!history.can_undo());
        prop_assert_eq!(history.future_len(), values.len());
    }
}

// ============================================================================
// Invariant 2: Redo immediately after undo restores the pre-undo present
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn redo_after_undo_is_identity(ops in ops_strategy(60)) {
        let mut history = HistoryState::new(0_i64);
        let mut model = Model::new(0, usize::MAX);
        for op in &ops {
            apply(&mut history, &mut model, op);
        }
        history.settle();
        let before = *history.present();
        let past_len = history.past_len();
        if history.undo() {
            prop_assert!(history.redo());
            prop_assert_eq!(*history.present(), before);
            prop_assert_eq!(history.past_len(), past_len);
        }
    }
}

// ============================================================================
// Invariant 3: Live replaces never change lengths
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn live_replace_keeps_lengths(
        ops in ops_strategy(40),
        live in prop::collection::vec(any::<i64>(), 1..20)
    ) {
        let mut history = HistoryState::new(0_i64);
        let mut model = Model::new(0, usize::MAX);
        for op in &ops {
            apply(&mut history, &mut model, op);
        }
        let (past, future) = (history.past_len(), history.future_len());
        for v in &live {
            history.replace(*v, false);
            prop_assert_eq!(history.past_len(), past);
            prop_assert_eq!(history.future_len(), future);
            prop_assert_eq!(*history.present(), *v);
        }
    }
}

// ============================================================================
// Invariant 4: Random sequences match the reference model
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn matches_reference_model(ops in ops_strategy(100)) {
        let mut history = HistoryState::new(0_i64);
        let mut model = Model::new(0, usize::MAX);
        for op in &ops {
            apply(&mut history, &mut model, op);

            prop_assert_eq!(*history.present(), model.present);
            prop_assert_eq!(history.past().copied().collect::<Vec<_>>(), model.past.clone());
            prop_assert_eq!(history.future().copied().collect::<Vec<_>>(), model.future.clone());
            prop_assert_eq!(history.is_live(), model.anchor.is_some());
            prop_assert_eq!(history.can_undo(), !model.past.is_empty());
            prop_assert_eq!(history.can_redo(), !model.future.is_empty());
        }
    }
}

// ============================================================================
// Invariant 5: Depth limit is never exceeded
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn depth_limit_never_exceeded(
        max_depth in 1usize..10,
        ops in ops_strategy(100)
    ) {
        let mut history = HistoryState::with_config(0_i64, HistoryConfig::new(max_depth));
        let mut model = Model::new(0, max_depth);
        for op in &ops {
            apply(&mut history, &mut model, op);
            prop_assert!(history.past_len() <= max_depth);
            prop_assert_eq!(history.past().copied().collect::<Vec<_>>(), model.past.clone());
        }
    }
}

// ============================================================================
// Invariant 6: Availability follows the stacks while live
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn live_present_does_not_gate_undo_redo(
        ops in ops_strategy(60),
        live in any::<i64>()
    ) {
        let mut history = HistoryState::new(0_i64);
        let mut model = Model::new(0, usize::MAX);
        for op in &ops {
            apply(&mut history, &mut model, op);
        }
        history.replace(live, false);
        model.live(live);

        let past_top = model.past.last().copied();
        prop_assert_eq!(history.can_undo(), past_top.is_some());
        prop_assert_eq!(history.undo(), past_top.is_some());
        model.undo();
        match past_top {
            Some(top) => prop_assert_eq!(*history.present(), top),
            None => prop_assert_eq!(*history.present(), live),
        }
        prop_assert_eq!(history.future().copied().collect::<Vec<_>>(), model.future.clone());
    }
}

// ============================================================================
// Invariant 7: Live-only values never reach the stacks
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn live_values_stay_off_the_stacks(ops in ops_strategy(80)) {
        // Live values are negative, committed ones non-negative.
        let ops: Vec<Op> = ops
            .into_iter()
            .map(|op| match op {
                Op::Live(v) => Op::Live(-1 - (v & i64::MAX) % 1_000),
                Op::Commit(v) => Op::Commit((v & i64::MAX) % 1_000),
                other => other,
            })
            .collect();
        let mut history = HistoryState::new(0_i64);
        for op in &ops {
            match *op {
                Op::Commit(v) => history.replace(v, true),
                Op::Live(v) => history.replace(v, false),
                // Settling turns a live value into a committed one.
                Op::Settle => continue,
                Op::Undo => {
                    history.undo();
                }
                Op::Redo => {
                    history.redo();
                }
            }
            prop_assert!(history.past().all(|v| *v >= 0));
            prop_assert!(history.future().all(|v| *v >= 0));
        }
    }
}
