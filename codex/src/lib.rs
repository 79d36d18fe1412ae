pub use board::*;
pub use cards::*;
pub use catalog::*;
pub use objectives::*;
pub use symbols::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod catalog;
mod counter;
mod objectives;
mod symbols;
