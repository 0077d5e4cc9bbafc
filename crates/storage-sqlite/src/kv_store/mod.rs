mod model;
mod repository;

pub use model::KeyValueDB;
pub use repository::KeyValueRepository;
