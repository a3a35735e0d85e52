//! Record types managed by the taxi service

pub mod macros;

pub mod car;
pub mod driver;
pub mod manufacturer;

pub use car::Car;
pub use driver::Driver;
pub use manufacturer::Manufacturer;
