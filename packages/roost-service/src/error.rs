pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Malformed record: {message}")]
	MalformedRecord { message: String },
	#[error("Provider error: {0}")]
	Provider(#[from] roost_providers::Error),
	#[error(transparent)]
	Storage(#[from] roost_storage::Error),
	#[error("Failed to read rules file at {path:?}.")]
	ReadRules { path: std::path::PathBuf, source: std::io::Error },
}
