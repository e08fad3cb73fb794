pub mod field;
pub mod kind;
