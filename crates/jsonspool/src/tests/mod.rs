mod cooperative;
pub mod utils;
