pub mod config;
pub mod error;
pub mod network;
pub mod observation;
pub mod parameter;


pub use config::*;
pub use error::*;
pub use network::*;
pub use observation::*;
pub use parameter::*;
