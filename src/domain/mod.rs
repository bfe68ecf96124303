pub mod note;
pub mod track;
pub mod transpose;
