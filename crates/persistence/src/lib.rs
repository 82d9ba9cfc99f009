//! Persistence for committed bookings, plans, and conversation history
//!
//! The in-memory store is the default [`travel_agent_core::BookingStore`]
//! implementation. It is process-local and safe to share across tasks;
//! sessions hand it committed records only after user confirmation. The
//! store itself cannot fail; fallible backends report through
//! [`travel_agent_core::Error::Persistence`].

mod memory;

pub use memory::MemoryStore;
