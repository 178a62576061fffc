pub mod coupons;
