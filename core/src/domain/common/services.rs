use crate::domain::{member::ports::MemberRepository, team::ports::TeamRepository};

/// Service facade shared by every use case. Repositories are handed in
/// explicitly; the service itself keeps no state between calls.
#[derive(Clone)]
pub struct Service<M, T>
where
    M: MemberRepository,
    T: TeamRepository,
{
    pub(crate) member_repository: M,
    pub(crate) team_repository: T,
}

impl<M, T> Service<M, T>
where
    M: MemberRepository,
    T: TeamRepository,
{
    pub fn new(member_repository: M, team_repository: T) -> Self {
        Self {
            member_repository,
            team_repository,
        }
    }
}
