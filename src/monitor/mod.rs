mod poller;

pub use poller::{PollContext, Poller};
