//! API data types
//!
//! Serde models for the device catalog: the catalog entries themselves,
//! the dynamic attribute values they carry, and the narrow payload shapes
//! used when creating devices.

mod device;
mod value;

pub use device::{CreatedDevice, Device, NewDevice, NewDeviceData};
pub use value::AttrValue;
