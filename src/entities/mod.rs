pub mod capability;
mod driver;
mod location;
mod quote;
mod transaction;
mod trip;

pub use capability::CapabilityTag;
pub use driver::{Driver, DriverId, DriverSeed, VehicleClass};
pub use location::Coordinates;
pub use quote::Quote;
pub use transaction::{Status as TransactionStatus, TripTransaction};
pub use trip::{Status as TripStatus, TripRecord, TripRequest};
