pub mod auth;
pub mod brands;
pub mod inventory;
pub mod manufacturers;
pub mod parts;
pub mod products;
pub mod representatives;
pub mod users;
pub mod warranties;
