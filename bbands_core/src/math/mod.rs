pub mod boll;
pub mod percent_b;
pub mod rolling;
