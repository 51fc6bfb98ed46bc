pub mod draft;

/// Request-level validation, checked at the boundary before anything touches
/// a service.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
