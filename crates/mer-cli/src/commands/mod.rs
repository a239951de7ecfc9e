pub mod publish;
pub mod search;
pub mod shared;
