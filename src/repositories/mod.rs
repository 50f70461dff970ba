mod api_empresa_repository;
mod api_obra_repository;
mod traits;

pub use api_empresa_repository::ApiEmpresaRepository;
pub use api_obra_repository::ApiObraRepository;
pub use traits::{EmpresaRepository, ObraRepository};
