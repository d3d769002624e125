pub mod document;
pub mod skill;
