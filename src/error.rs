use thiserror::Error;

/// Failures of the HTTP exchange itself, shared by every client.
///
/// `Rejected` carries the server's own message (the `msg` or `error`
/// field of the response body) so callers can surface it verbatim.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("UPI number is required")]
    MissingUpiNumber,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Product title is required")]
    MissingTitle,
    #[error("Product description is required")]
    MissingDescription,
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("Please upload at least {0} product images")]
    NotEnoughImages(usize),
    #[error("Please log in to upload a product")]
    LoginRequired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("Product is not available for booking")]
    ProductUnavailable,
    #[error("Meeting location is required")]
    MissingLocation,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("No order to confirm")]
    NothingToConfirm,
    #[error("Please confirm that you agree to meet")]
    MeetingNotAcknowledged,
    #[error("Meeting location not found in order")]
    MissingMeetingLocation,
    #[error(transparent)]
    Api(#[from] ApiError),
}
