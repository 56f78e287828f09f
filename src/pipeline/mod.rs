pub mod assign;
pub mod contrast;
pub mod extract;
pub mod filter;
pub mod load;
pub mod quantize;
