//! PathIntent- und PathCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::PathCommand;
pub use intent::PathIntent;
