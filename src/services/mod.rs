pub mod decision;
pub mod inspect;
