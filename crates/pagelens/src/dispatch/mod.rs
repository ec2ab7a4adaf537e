//! Command dispatch
//!
//! The outward face of the core: [`Command`] in, [`Response`] out. Hosts
//! hand the dispatcher JSON or native commands together with the page
//! state; nothing throws across this boundary.

mod command;
mod dispatcher;
mod response;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use dispatcher::CommandDispatcher;
pub use response::Response;
