pub mod charges;
pub mod document;
pub mod route;
pub mod terms;
