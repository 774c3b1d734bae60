// Dashboard: the resume list, view routing, and the open builder session.

pub mod controller;
pub mod handlers;

pub use controller::{Dashboard, DashboardState, View};
