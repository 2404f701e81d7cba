pub mod boat;
pub mod booking;
pub mod feedback;
pub mod payment;
pub mod support_ticket;
pub mod trip;
pub mod user;
