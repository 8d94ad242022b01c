pub mod job_match;
pub mod job_role;
pub mod resume;
