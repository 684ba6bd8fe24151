pub mod conditions;
pub mod mappers;
pub mod repositories;

pub use repositories::member_repository::PostgresMemberRepository;
