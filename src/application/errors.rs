use crate::core::meetup::decider::cast_vote::decide::VoteRejected;
use crate::core::meetup::event::EventId;
use crate::core::meetup::vote_aggregate::VoteId;
use crate::core::ports::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("vote rejected: {0}")]
    Rejected(#[from] VoteRejected),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("location votes {0} not found")]
    VoteNotFound(VoteId),

    #[error("event {0} not found")]
    EventNotFound(EventId),
}

impl ApplicationError {
    /// Rejections and unknown ids are the caller's doing, everything else is ours.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ApplicationError::Repository(_))
    }
}

#[cfg(test)]
mod application_errors_tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn it_should_wrap_rejections() {
        let error: ApplicationError = VoteRejected::OutsideVotingWindow.into();
        assert_eq!(
            error.to_string(),
            "vote rejected: outside of the voting time window"
        );
        assert!(error.is_caller_error());
    }

    #[rstest]
    fn it_should_pass_repository_errors_through() {
        let error: ApplicationError = RepositoryError::Offline("Vote repository").into();
        assert_eq!(error.to_string(), "Vote repository offline");
        assert!(!error.is_caller_error());
    }

    #[rstest]
    fn it_should_name_the_missing_vote() {
        let id = Uuid::now_v7();
        assert_eq!(
            ApplicationError::VoteNotFound(id).to_string(),
            format!("location votes {id} not found")
        );
    }
}
