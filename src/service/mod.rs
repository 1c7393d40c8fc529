//! DataManager (persistence), RequestValidator (field rules), CrudService (request pipeline).

mod crud;
mod data_manager;
mod validation;
pub use crud::CrudService;
pub use data_manager::DataManager;
pub use validation::RequestValidator;
