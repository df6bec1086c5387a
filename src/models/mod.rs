pub mod location;
pub mod pricing;
pub mod vehicle;
