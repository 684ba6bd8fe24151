pub mod create_member;
pub mod get_member;
pub mod get_member_stats;
pub mod search_members;
pub mod search_members_page;
