pub mod agenda;
pub mod not_found;
