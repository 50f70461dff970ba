pub mod mock_empresa_repository;
pub mod mock_obra_repository;

#[allow(unused_imports)]
pub use mock_empresa_repository::MockEmpresaRepository;
#[allow(unused_imports)]
pub use mock_obra_repository::MockObraRepository;
