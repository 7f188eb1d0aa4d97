pub mod eni;
pub mod output;
pub mod serve;
pub mod source;
