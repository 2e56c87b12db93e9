pub mod dates;
pub mod error;
pub mod mapping;
pub mod params;
pub mod paths;
pub mod settings;
