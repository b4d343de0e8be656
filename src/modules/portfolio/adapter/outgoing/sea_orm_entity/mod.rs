pub mod certificates;
pub mod educations;
pub mod experiences;
pub mod projects;
pub mod skills;
