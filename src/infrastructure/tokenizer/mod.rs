mod hf_token_counter;

pub use hf_token_counter::HfTokenCounter;
