mod exchange;
pub mod lookup;
pub mod resolve_hostname;

pub use lookup::LookupUseCase;
pub use resolve_hostname::ResolveHostnameUseCase;
