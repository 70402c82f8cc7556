//! Admin console for the fundraising platform — campaign listing,
//! search and sort, and pledge intake over a REST API.

pub mod handlers;
pub mod listing;
pub mod models;
pub mod router;
pub mod server;
pub mod store;

pub use server::ConsoleServer;
pub use store::ConsoleStore;
