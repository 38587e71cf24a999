pub mod cart_items;
pub mod courses;
pub mod order_items;
pub mod orders;
pub mod users;

pub use cart_items as cart_item_entity;
pub use courses as course_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use orders::OrderStatus;
pub use users as user_entity;
