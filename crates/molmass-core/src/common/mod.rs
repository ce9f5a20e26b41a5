pub mod constants;
pub mod pertab;
