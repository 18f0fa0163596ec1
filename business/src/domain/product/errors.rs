pub const MISSING_REQUIRED_FIELDS_MESSAGE: &str =
    "Product title, description, and price are required fields.";

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Title, description or price was absent, empty or zero-equivalent.
    #[error("Product title, description, and price are required fields.")]
    MissingRequiredFields,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
