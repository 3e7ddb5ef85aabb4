pub mod block;
pub mod encode;
pub mod script;
pub mod transaction;
