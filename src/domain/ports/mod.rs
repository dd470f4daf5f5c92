mod events_port;

pub use events_port::{CreatedEvent, EventsPort, NewEvent};
