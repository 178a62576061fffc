pub mod basket;
pub mod coupons;
