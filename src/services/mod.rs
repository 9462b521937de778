//! Service layer
//!
//! Session and deletion coordination on top of the graph store. The
//! renderer talks to [`TopologySession`]; nothing in here knows how
//! the graph is drawn.

mod deletion;
mod session;

pub use deletion::{
    DeleteEndpoint, DeleteError, DeletionCoordinator, HttpDeleteEndpoint,
};
pub use session::{TopologyEvent, TopologySession};
