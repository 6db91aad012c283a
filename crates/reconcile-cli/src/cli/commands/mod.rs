pub mod compare;
pub mod dispatch;
pub mod list;

pub use dispatch::dispatch;
