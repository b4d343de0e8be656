pub mod certificates;
pub mod educations;
pub mod experiences;
pub mod portfolio;
pub mod projects;
pub mod skills;
