mod base;
mod make;
mod record;
mod request;

pub use base::*;
pub use make::*;
pub use record::*;
pub use request::*;
