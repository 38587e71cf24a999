pub mod cart;
pub mod common;
pub mod course;
pub mod order;
pub mod user;

pub use cart::*;
pub use common::*;
pub use course::*;
pub use order::*;
pub use user::*;
