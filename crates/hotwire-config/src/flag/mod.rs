//! Command-line registration of path-or-content flags.

mod clause;

#[cfg(test)]
mod tests;

pub use clause::FlagClause;
