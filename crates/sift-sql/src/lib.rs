mod adapter;
mod page;

pub use adapter::{AdapterError, QueryAdapter};
pub use page::page;
