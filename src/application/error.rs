#[derive(Debug)]
pub enum ApplicationError {
    NotFound(String),
    InternalError(String),
    BadRequest(String),
    Unauthorized,
    PayloadTooLarge,
    Conflict(String),
}
