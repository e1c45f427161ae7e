//! # Framework Errors
//!
//! Errors raised by the store plumbing itself, as opposed to the domain errors
//! entity hooks return (those travel boxed inside [`FrameworkError::EntityError`]).

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an `EntityError`.
    ///
    /// Any other variant, or an `EntityError` carrying a foreign type, is
    /// handed back unchanged.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True when the actor task is gone and the request never completed.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_entity_error_downcasts_to_original_type() {
        let err = FrameworkError::EntityError(Box::new(Boom));
        assert_eq!(err.into_entity_error::<Boom>().unwrap(), Boom);
    }

    #[test]
    fn test_foreign_entity_error_is_returned_unchanged() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.into_entity_error::<Boom>().unwrap_err();
        assert!(back.to_string().contains("disk"));
    }

    #[test]
    fn test_channel_failures() {
        assert!(FrameworkError::ActorClosed.is_channel_failure());
        assert!(FrameworkError::ActorDropped.is_channel_failure());
        assert!(!FrameworkError::NotFound("x".into()).is_channel_failure());
    }
}
