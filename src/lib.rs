//! # Contesa - A Laboratory for Shared-Mutable-State Hazards
//!
//! A controlled experiment measuring whether a state-mutation strategy
//! preserves a simple invariant (*each call returns a value one greater than
//! the previous call*) when the state is shared by two concurrently
//! executing workers.
//!
//! ## The Experiment
//!
//! A counter that hands out consecutive numbers looks like the easiest
//! possible piece of shared state: one variable, one line of mutation. The
//! catch is that `current += 1` is not one operation at the instruction
//! level; it is a read, an add, and a write, and another thread can run
//! between any two of them.
//!
//! This crate implements the same counter contract six times, each variant
//! differing along exactly one axis of concurrency control, and provides a
//! harness that races two workers against a shared instance and counts how
//! often the invariant broke:
//!
//! | Strategy | Mechanism | Expected outcome |
//! |----------|-----------|------------------|
//! | `unsynchronized` | plain read-increment-write | frequent violations |
//! | `visible` | visible accesses, non-atomic increment | still frequent violations |
//! | `mutex-method` | mutex around the whole call | zero violations |
//! | `mutex-block` | mutex around the critical statements | zero violations |
//! | `atomic` | one hardware-level atomic step | zero violations |
//! | `spin-locked` | explicit acquire/release pair | zero violations |
//!
//! The contrast between `unsynchronized` and `visible` is the heart of the
//! exercise: visibility guarantees alone do not make a read-modify-write
//! safe. Atomicity and mutual exclusion do.
//!
//! ## Quick Start
//!
//! ```rust
//! use contesa::counters::Strategy;
//! use contesa::harness::run_trial;
//!
//! let result = run_trial(Strategy::Atomic, 100_000)?;
//!
//! let analysis = result.analysis();
//! assert_eq!(analysis.intersections, 0);
//! assert_eq!(analysis.collisions_a, 0);
//! assert_eq!(analysis.collisions_b, 0);
//!
//! println!("{} strategy {}.", result.strategy(), result.verdict());
//! # Ok::<(), contesa::harness::TrialError>(())
//! ```
//!
//! ## How Violations Are Detected
//!
//! Each worker inserts every value it receives into its own set. A correct
//! counter hands out each number exactly once, so after `N` calls per worker:
//!
//! - each set holds exactly `N` values (a smaller set means the worker saw a
//!   duplicate in its own stream: a **collision**), and
//! - the two sets are disjoint (a value in both sets was handed out twice:
//!   an **intersection**).
//!
//! A trial with zero intersections and zero collisions *may be* thread-safe;
//! a trial with any is *not*. The wording matters: one clean schedule proves
//! nothing about all schedules, so the verdict never claims proof.
//!
//! ## Reports
//!
//! The [`report`] modules render batches of results as an ASCII table
//! (feature `table`) or JSON (feature `json`). The `demo` feature adds a
//! small CLI that runs every strategy in turn:
//!
//! ```bash
//! cargo run --example demo --features demo -- --iterations 1000000
//! ```
//!
//! ## Non-goals
//!
//! This is not a general-purpose concurrency library. Trials always use
//! exactly two workers, results are not persisted, and the flawed variants
//! are flawed on purpose: `Unsynchronized` contains a genuine data race,
//! which is precisely what it is for.

pub mod analysis;
pub mod counters;
pub mod harness;
pub mod report;
