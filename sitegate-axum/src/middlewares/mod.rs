pub mod resolve;

pub use resolve::resolve_site;
