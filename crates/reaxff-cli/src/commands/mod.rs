pub mod energy;
pub mod inspect;
