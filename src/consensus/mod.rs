pub mod genesis;
pub mod pow;
