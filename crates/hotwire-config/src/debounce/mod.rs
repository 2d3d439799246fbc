//! Single-slot debounce timer.
//!
//! A [`DebounceScheduler`] is either idle or armed with one deadline.
//! Every [`reset`](DebounceScheduler::reset) pushes the deadline out to
//! `now + quiet`; when the deadline passes without another reset the fire
//! callback runs once and the scheduler goes back to idle.

mod scheduler;

#[cfg(test)]
mod tests;

pub use scheduler::DebounceScheduler;
