use log::warn;

use crate::error::{Result, SelectError};

/// Policy for handling identifiers that yield no selection key
///
/// An identifier without any digits cannot be keyed. Such records are never
/// written; the policy only decides whether the run continues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierPolicy {
    /// Drop the record and continue
    #[default]
    Drop,
    /// Abort the run with the selection error
    Fail,
}
impl IdentifierPolicy {
    /// Resolves a selection error according to the policy
    ///
    /// Returns `Ok(())` if the record should be skipped and the run continue.
    pub fn handle(self, err: SelectError) -> Result<()> {
        match self {
            Self::Drop => {
                warn!("Dropping record: {err}");
                Ok(())
            }
            Self::Fail => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_drop_continues() {
        let err = SelectError::DegenerateIdentifier("orphan".to_string());
        assert!(IdentifierPolicy::Drop.handle(err).is_ok());
    }

    #[test]
    fn test_fail_propagates() {
        let err = SelectError::DegenerateIdentifier("orphan".to_string());
        let result = IdentifierPolicy::Fail.handle(err);
        assert!(matches!(
            result,
            Err(Error::SelectError(SelectError::DegenerateIdentifier(id))) if id == "orphan"
        ));
    }

    #[test]
    fn test_default_is_drop() {
        assert_eq!(IdentifierPolicy::default(), IdentifierPolicy::Drop);
    }
}
