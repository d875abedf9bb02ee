//! Data models module
//!
//! This module contains all data structures the removal core reads and produces

pub mod event;
pub mod carpool;
pub mod notification;
pub mod removal;

// Re-export commonly used models
pub use event::Event;
pub use carpool::{Carpool, CarpoolType, Participant, ParticipantRole};
pub use notification::{NotificationKind, RemovalNotification};
pub use removal::{Authority, EventUrgency, RemovalImpact, RemovalRequest, RemovalRequestStatus, RemovalResult};
