pub mod adapter;
pub mod args_resolver;
pub mod catalog;

pub use adapter::ProfileAdapter;
pub use args_resolver::FileProfileArgsResolver;
pub use catalog::DirectoryProfileCatalog;
