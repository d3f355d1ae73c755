pub mod body;
pub mod limits;
pub mod saved;
pub mod template;
