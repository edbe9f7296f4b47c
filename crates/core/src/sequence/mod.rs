//! Request sequencing.
//!
//! When a user switches periods quickly, responses can arrive out of order.
//! Each request takes a ticket from a [`RequestSequencer`]; a response is only
//! applied if its ticket is still the latest one issued.

pub mod sequencer;


pub use sequencer::{RequestSequencer, Ticket};
