pub mod conversion;
pub mod definition;
pub mod params;
pub mod store;
pub mod template;

pub use conversion::*;
pub use definition::*;
pub use params::*;
pub use store::*;
pub use template::*;
