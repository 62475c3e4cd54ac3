pub mod session;

pub use session::SessionHolder;
